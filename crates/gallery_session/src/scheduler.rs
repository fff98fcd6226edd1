//! Delayed publications driven by frame time

use gallery_event::{Event, EventBus};

type Publish = Box<dyn FnOnce(&EventBus) + Send>;

struct ScheduledPublish {
    /// Frame time left before this fires
    time_remaining: f32,
    label: &'static str,
    publish: Publish,
}

/// Fire-and-forget countdown timers measured in frame time
#[derive(Default)]
pub struct Scheduler {
    /// Sorted by `time_remaining`, stable for equal times
    pending: Vec<ScheduledPublish>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `event` once `delay` seconds of frame time have passed
    pub fn schedule_event<E: Event>(&mut self, delay: f32, event: E) {
        let label = std::any::type_name::<E>();
        self.schedule(delay, label, move |bus| bus.publish(event));
    }

    /// Run `publish` once `delay` seconds of frame time have passed
    pub fn schedule<F>(&mut self, delay: f32, label: &'static str, publish: F)
    where
        F: FnOnce(&EventBus) + Send + 'static,
    {
        let time_remaining = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let index = self
            .pending
            .partition_point(|task| task.time_remaining <= time_remaining);
        self.pending.insert(
            index,
            ScheduledPublish {
                time_remaining,
                label,
                publish: Box::new(publish),
            },
        );
    }

    /// Count every timer down and run the ones that expired. Returns how many ran.
    pub fn advance(&mut self, delta_time: f32, bus: &EventBus) -> usize {
        let delta_time = delta_time.max(0.0);
        for task in &mut self.pending {
            task.time_remaining -= delta_time;
        }

        let ready = self.pending.partition_point(|task| task.time_remaining <= 0.0);
        let due: Vec<ScheduledPublish> = self.pending.drain(..ready).collect();
        for task in &due {
            log::trace!("scheduled {} fired", task.label);
        }
        let count = due.len();
        for task in due {
            (task.publish)(bus);
        }
        count
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the soonest pending task fires
    pub fn next_due(&self) -> Option<f32> {
        self.pending.first().map(|task| task.time_remaining.max(0.0))
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field(
                "pending",
                &self
                    .pending
                    .iter()
                    .map(|t| (t.label, t.time_remaining))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
