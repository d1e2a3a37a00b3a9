//! Phase ticker background task

use std::{sync::Weak, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Period of the countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that counts the active phase down once per second.
///
/// Holds only a weak reference so dropping the state ends the task. Exits
/// when the phase completes, when it has been superseded by another ticker,
/// or when the timer is no longer running.
pub async fn phase_ticker_task(state: Weak<AppState>, ticker_id: u64) {
    debug!("Starting phase ticker #{}", ticker_id);

    // First tick one full period after start, not immediately
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("Timer state dropped, stopping ticker #{}", ticker_id);
            break;
        };

        match state.tick(ticker_id) {
            Ok(Some(TickOutcome::Counted(remaining))) => {
                debug!("Ticker #{}: {}s remaining", ticker_id, remaining);
            }
            Ok(Some(TickOutcome::PhaseComplete(next))) => {
                info!("Phase complete, next up: {} (press start to continue)", next);
                break;
            }
            Ok(Some(TickOutcome::Stopped)) => {
                debug!("Timer not running, stopping ticker #{}", ticker_id);
                break;
            }
            Ok(None) => {
                debug!("Ticker #{} superseded, exiting", ticker_id);
                break;
            }
            Err(e) => {
                error!("Ticker #{} failed to update timer: {}", ticker_id, e);
                break;
            }
        }
    }
}
