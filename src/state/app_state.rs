//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{tasks::phase_ticker_task, utils::format_uptime};
use super::{Phase, PhaseDurations, PhaseMinutes, TickOutcome, TimerError, TimerState};

/// The active tick source, tagged so a superseded task can tell it is stale
#[derive(Debug)]
struct TickerHandle {
    id: u64,
    handle: JoinHandle<()>,
}

/// Main application state that owns the timer and its tick source
#[derive(Debug)]
pub struct AppState {
    /// Timer configuration and countdown state
    pub timer_state: Arc<Mutex<TimerState>>,
    /// At most one running ticker; replaced on every start
    ticker: Mutex<Option<TickerHandle>>,
    next_ticker_id: AtomicU64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer at the start of focus
    pub fn new(port: u16, host: String, durations: PhaseDurations) -> Self {
        let initial = TimerState::new(durations);
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_state: Arc::new(Mutex::new(initial)),
            ticker: Mutex::new(None),
            next_ticker_id: AtomicU64::new(1),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply an update to the timer state, record the action and notify watchers
    fn update_timer<F, R>(&self, action: Option<&str>, updater: F) -> Result<(TimerState, R), TimerError>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut timer_state = self.timer_state.lock()
            .map_err(|e| TimerError::poisoned("timer state", e))?;

        let result = updater(&mut *timer_state);
        let new_timer_state = timer_state.clone();
        drop(timer_state); // Release the lock early

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        // send_replace never fails, even without receivers
        self.timer_update_tx.send_replace(new_timer_state.clone());

        Ok((new_timer_state, result))
    }

    fn lock_ticker(&self) -> Result<std::sync::MutexGuard<'_, Option<TickerHandle>>, TimerError> {
        self.ticker.lock().map_err(|e| TimerError::poisoned("ticker", e))
    }

    fn cancel_ticker(slot: &mut Option<TickerHandle>) {
        if let Some(previous) = slot.take() {
            debug!("Cancelling ticker #{}", previous.id);
            previous.handle.abort();
        }
    }

    /// Start or resume the countdown, replacing any active ticker
    pub fn start(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        Self::cancel_ticker(&mut ticker);

        let (timer_state, _) = self.update_timer(Some("start"), |state| state.start())?;

        let id = self.next_ticker_id.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(phase_ticker_task(Arc::downgrade(self), id));
        *ticker = Some(TickerHandle { id, handle });

        info!(
            "Timer started: phase={}, remaining={}s, ticker=#{}",
            timer_state.phase, timer_state.remaining_seconds, id
        );
        Ok(timer_state)
    }

    /// Pause the countdown, keeping the remaining time
    pub fn pause(&self) -> Result<TimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        Self::cancel_ticker(&mut ticker);

        let (timer_state, was_running) = self.update_timer(Some("pause"), |state| state.pause())?;
        if was_running {
            info!("Timer paused at {}s", timer_state.remaining_seconds);
        } else {
            debug!("Pause requested while timer not running");
        }
        Ok(timer_state)
    }

    /// Stop and return to the beginning of a focus phase
    pub fn reset(&self) -> Result<TimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        Self::cancel_ticker(&mut ticker);

        let (timer_state, _) = self.update_timer(Some("reset"), |state| state.reset())?;
        info!("Timer reset to {} ({}s)", timer_state.phase, timer_state.remaining_seconds);
        Ok(timer_state)
    }

    /// Skip to the next phase and stop
    pub fn skip(&self) -> Result<TimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        Self::cancel_ticker(&mut ticker);

        let (timer_state, phase) = self.update_timer(Some("skip"), |state| state.advance_phase())?;
        info!("Skipped to {} ({}s)", phase, timer_state.remaining_seconds);
        Ok(timer_state)
    }

    /// Change the length of a phase; applies immediately to the active phase
    pub fn set_duration(&self, phase: Phase, minutes: u64) -> Result<TimerState, TimerError> {
        let minutes = PhaseMinutes::new(minutes)?;
        let (timer_state, _) = self.update_timer(Some("set-duration"), |state| {
            state.set_duration(phase, minutes)
        })?;
        info!("{} duration set to {} minutes", phase, minutes.minutes());
        Ok(timer_state)
    }

    /// Flip the settings panel visibility flag
    pub fn toggle_settings(&self) -> Result<TimerState, TimerError> {
        let (timer_state, visible) = self.update_timer(Some("toggle-settings"), |state| state.toggle_settings())?;
        debug!("Settings visible: {}", visible);
        Ok(timer_state)
    }

    /// Advance the countdown by one second on behalf of ticker `ticker_id`.
    ///
    /// Returns `None` when that ticker is no longer the active one.
    pub fn tick(&self, ticker_id: u64) -> Result<Option<TickOutcome>, TimerError> {
        let mut ticker = self.lock_ticker()?;
        if ticker.as_ref().map(|t| t.id) != Some(ticker_id) {
            return Ok(None);
        }

        let (_, outcome) = self.update_timer(None, |state| state.tick())?;
        match outcome {
            TickOutcome::Counted(_) => {}
            TickOutcome::PhaseComplete(_) | TickOutcome::Stopped => {
                // The ticker is finishing on its own; detach rather than abort it
                ticker.take();
            }
        }
        Ok(Some(outcome))
    }

    /// Cancel the tick source, used on teardown
    pub fn shutdown(&self) {
        match self.ticker.lock() {
            Ok(mut ticker) => Self::cancel_ticker(&mut ticker),
            Err(e) => warn!("Failed to lock ticker during shutdown: {}", e),
        }
    }

    /// Whether a ticker is currently active
    pub fn has_active_ticker(&self) -> bool {
        self.ticker.lock().map(|t| t.is_some()).unwrap_or(false)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, TimerError> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| TimerError::poisoned("timer state", e))
    }

    /// Subscribe to timer state updates
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Ok(ticker) = self.ticker.get_mut() {
            Self::cancel_ticker(ticker);
        }
    }
}
