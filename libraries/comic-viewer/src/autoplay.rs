//! Autoplay timer
//!
//! A spawned interval task that reports ticks back to the session. Each timer
//! carries a generation number and the collection it was started for, so a
//! tick that was already queued when the timer was replaced can be told apart
//! from a live one.

use crate::events::SessionSignal;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// One firing of an autoplay timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayTick {
    /// Generation of the timer that produced this tick
    pub generation: u64,

    /// Collection that was selected when the timer started
    pub collection_id: String,
}

/// Owner of a running autoplay timer.
///
/// Cancelling (or dropping) the handle aborts the task, so no tick is sent
/// afterwards.
#[derive(Debug)]
pub struct AutoplayHandle {
    task: JoinHandle<()>,
    generation: u64,
}

impl AutoplayHandle {
    /// Spawn a timer that sends `tick` every `period`, first after one full period.
    pub(crate) fn start(
        runtime: &Handle,
        period: Duration,
        tick: AutoplayTick,
        signals: UnboundedSender<SessionSignal>,
    ) -> Self {
        let generation = tick.generation;

        let task = runtime.spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                trace!(generation = tick.generation, collection = %tick.collection_id, "Autoplay tick");
                if signals.send(SessionSignal::Tick(tick.clone())).is_err() {
                    // Session is gone
                    break;
                }
            }
        });

        Self { task, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the timer
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for AutoplayHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn tick(generation: u64) -> AutoplayTick {
        AutoplayTick {
            generation,
            collection_id: "demo".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = AutoplayHandle::start(&Handle::current(), Duration::from_secs(4), tick(1), tx);

        let started = Instant::now();
        let signal = rx.recv().await.unwrap();
        assert_eq!(signal, SessionSignal::Tick(tick(1)));
        assert_eq!(started.elapsed(), Duration::from_secs(4));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = AutoplayHandle::start(&Handle::current(), Duration::from_secs(4), tick(7), tx);
        assert_eq!(handle.generation(), 7);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(20)).await;

        // Task aborted, its sender dropped with it
        assert!(rx.recv().await.is_none());
    }
}
