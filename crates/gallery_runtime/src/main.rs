//! Shooting Gallery Runner
//!
//! Plays a gallery session headlessly: the autopilot aims and fires, the HUD
//! logs notifications and requests further rounds, and the process exits once
//! every round is over or the frame budget runs out.
//!
//! Run with: cargo run -p gallery_runtime -- grid
//!       or: GALLERY_PRESET=pyramid RUST_LOG=debug cargo run --bin gallery

mod autopilot;
mod boot_config;
mod hud;
mod render;

use std::sync::Arc;

use boot_config::BootConfig;
use gallery_event::EventBus;
use gallery_session::{AssetLibrary, Session, SessionError};

use crate::autopilot::Autopilot;
use crate::hud::Hud;
use crate::render::LogRenderer;

fn main() {
    let config = BootConfig::load();

    let debug = config.as_ref().map_or(false, |c| c.debug);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if debug { "debug" } else { "info" }),
    )
    .init();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC: {}", panic_info);
    }));

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(2);
        }
    };
    config.log_summary();

    if let Err(err) = run(&config) {
        log::error!("Session failed: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &BootConfig) -> Result<(), SessionError> {
    let bus = EventBus::shared();
    let hud = Hud::attach(&bus, config.rounds);

    let assets = AssetLibrary::builtin();
    let mut session = Session::from_config(config.session.clone(), &assets, Arc::clone(&bus))?;
    let mut input = Autopilot::new(config.session.rotation_speed);
    let mut renderer = LogRenderer::new(config.log_every);

    let delta_time = config.frame_delta();
    for _ in 0..config.frames {
        session.step(delta_time, &mut input, &mut renderer);
        if hud.finished() {
            break;
        }
    }

    let state = session.state();
    if hud.finished() {
        log::info!(
            "Finished {} round(s) in {} frames ({:.1}s simulated)",
            hud.rounds_completed(),
            session.frame_count(),
            session.frame_count() as f32 * delta_time
        );
    } else {
        log::warn!(
            "Frame budget of {} exhausted after {} round(s): {}/{} kills, tracking {:?}",
            config.frames,
            hud.rounds_completed(),
            state.kill_count,
            state.kill_target,
            input.current()
        );
    }
    log::info!(
        "Last round: {} shots, {} hits ({:.0}% accuracy), {} hit markers overall",
        state.shots_fired,
        state.hits,
        state.accuracy() * 100.0,
        hud.hit_markers()
    );

    if log::log_enabled!(log::Level::Debug) {
        match session.snapshot().to_json() {
            Ok(json) => log::debug!("Final snapshot: {}", json),
            Err(err) => log::warn!("Snapshot serialization failed: {}", err),
        }
    }

    Ok(())
}
