//! Countdown tick background task

use std::{ops::ControlFlow, sync::Arc, time::Duration};
use futures::{pin_mut, stream::{self, Stream, StreamExt}};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::{timer_engine::EngineShared, DigitWheels};

/// Delay between two ticks of a running countdown
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Lazy stream of one-second ticks counting `start` down to `0:00`.
///
/// Each item is the wheels after one more second has been taken off, so a
/// countdown of N seconds yields exactly N items, the last one being zero.
/// The first item arrives one `period` after the stream is created. The
/// stream cannot be restarted; build a new one for the next countdown.
pub fn ticks(start: DigitWheels, period: Duration) -> impl Stream<Item = DigitWheels> {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    stream::unfold((interval, start), |(mut interval, wheels)| async move {
        let next = wheels.decrement()?;
        interval.tick().await;
        Some((next, (interval, next)))
    })
}

/// Background task driving one countdown.
///
/// Every tick is handed to the engine together with the epoch this task was
/// started under; the engine refuses ticks from a cancelled countdown, so the
/// task ends as soon as it is told to break.
pub async fn countdown_task(engine: Arc<EngineShared>, epoch: u64, configured: DigitWheels) {
    info!("Countdown task started for {}s (epoch {})", configured.total_seconds(), epoch);

    let ticks = ticks(configured, TICK_INTERVAL);
    pin_mut!(ticks);

    while let Some(wheels) = ticks.next().await {
        if let ControlFlow::Break(()) = engine.apply_tick(epoch, wheels) {
            debug!("Countdown task for epoch {} finished", epoch);
            return;
        }
    }
}
