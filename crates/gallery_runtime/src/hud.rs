//! Event-driven HUD for headless runs
//!
//! Logs notifications and plays the UI's part in the round loop: when the
//! game-over overlay appears it asks for another round until the configured
//! number of rounds has been played.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use gallery_event::{EventBus, Priority, SubscriberId};
use gallery_session::{
    AmmoChanged, GameOver, GameOverOverlay, HitMarker, KillCountChanged, PlayAgainRequested,
    TargetConfigChanged,
};

#[derive(Debug, Default)]
struct HudState {
    rounds_completed: AtomicU32,
    hits: AtomicU32,
    finished: AtomicBool,
}

/// Subscribes to session notifications for as long as it lives
pub struct Hud {
    bus: Arc<EventBus>,
    state: Arc<HudState>,
    subscriptions: Vec<SubscriberId>,
}

impl Hud {
    pub fn attach(bus: &Arc<EventBus>, rounds: u32) -> Self {
        let state = Arc::new(HudState::default());
        let mut subscriptions = Vec::new();

        subscriptions.push(bus.subscribe::<TargetConfigChanged, _>(|event| {
            log::info!("HUD: {} targets ({})", event.count, event.name);
        }));

        subscriptions.push(bus.subscribe::<KillCountChanged, _>(|event| {
            log::info!("HUD: kills {}/{}", event.kill_count, event.kill_target);
        }));

        subscriptions.push(bus.subscribe::<AmmoChanged, _>(|event| {
            log::debug!("HUD: ammo {}/{}", event.mag_ammo, event.max_ammo);
        }));

        let hits = Arc::clone(&state);
        subscriptions.push(bus.subscribe_with_priority::<HitMarker, _>(
            move |event| {
                hits.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("HUD: hit marker on {}", event.target);
            },
            Priority::EARLY,
        ));

        subscriptions.push(bus.subscribe::<GameOver, _>(|event| {
            let accuracy = if event.shots_fired == 0 {
                0.0
            } else {
                100.0 * event.hits as f32 / event.shots_fired as f32
            };
            log::info!(
                "HUD: game over with {} kills ({:.0}% accuracy)",
                event.kill_count,
                accuracy
            );
        }));

        let overlay_state = Arc::clone(&state);
        let weak_bus: Weak<EventBus> = Arc::downgrade(bus);
        subscriptions.push(bus.subscribe::<GameOverOverlay, _>(move |_| {
            let completed = overlay_state.rounds_completed.fetch_add(1, Ordering::SeqCst) + 1;
            if completed >= rounds {
                overlay_state.finished.store(true, Ordering::SeqCst);
                log::info!("HUD: {} round(s) complete", completed);
            } else if let Some(bus) = weak_bus.upgrade() {
                log::info!("HUD: play again ({}/{})", completed + 1, rounds);
                bus.publish(PlayAgainRequested);
            }
        }));

        Self {
            bus: Arc::clone(bus),
            state,
            subscriptions,
        }
    }

    /// Every requested round has shown its game-over overlay
    pub fn finished(&self) -> bool {
        self.state.finished.load(Ordering::SeqCst)
    }

    pub fn rounds_completed(&self) -> u32 {
        self.state.rounds_completed.load(Ordering::SeqCst)
    }

    /// Hit markers shown across all rounds
    pub fn hit_markers(&self) -> u32 {
        self.state.hits.load(Ordering::Relaxed)
    }
}

impl Drop for Hud {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}
