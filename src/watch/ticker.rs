// src/watch/ticker.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clock::Clock;
use crate::engine::RuntimeEvent;

/// Periodically report the clock's calendar date to the runtime.
///
/// The core ignores ticks that carry the date it already has, so the period
/// only bounds how late a midnight rollover is noticed.
pub fn spawn_day_ticker(
    clock: Arc<dyn Clock>,
    period: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let today = clock.today();
            if runtime_tx.send(RuntimeEvent::DayTick { today }).await.is_err() {
                debug!("runtime channel closed; stopping day ticker");
                break;
            }
        }
    })
}
