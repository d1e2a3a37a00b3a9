//! Timer state structure and its transitions
//!
//! Everything here is synchronous. Scheduling the one-second tick lives in
//! `AppState` and the phase ticker task.

use serde::{Deserialize, Serialize};

use super::{Phase, PhaseDurations, PhaseMinutes};

/// Coarse status derived from the running/paused flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Controls a front-end should offer for the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Start,
    Pause,
    Skip,
    Reset,
    Settings,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown moved on, carrying the new remaining seconds
    Counted(u64),
    /// Countdown was already at zero; the timer advanced to the given phase
    PhaseComplete(Phase),
    /// Timer is not running, nothing changed
    Stopped,
}

/// Timer state for the focus/break countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub durations: PhaseDurations,
    pub running: bool,
    pub paused: bool,
    pub settings_visible: bool,
}

impl TimerState {
    /// Create an idle timer at the start of a focus phase
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            phase: Phase::Focus,
            remaining_seconds: durations.focus,
            durations,
            running: false,
            paused: false,
            settings_visible: false,
        }
    }

    /// Configured length of the active phase in seconds
    pub fn current_duration(&self) -> u64 {
        self.durations.of(self.phase)
    }

    pub fn status(&self) -> TimerStatus {
        match (self.running, self.paused) {
            (true, _) => TimerStatus::Running,
            (false, true) => TimerStatus::Paused,
            (false, false) => TimerStatus::Idle,
        }
    }

    pub fn controls(&self) -> Vec<Control> {
        match self.status() {
            TimerStatus::Running => vec![Control::Pause, Control::Skip, Control::Reset, Control::Settings],
            TimerStatus::Paused => vec![Control::Start, Control::Skip, Control::Reset, Control::Settings],
            TimerStatus::Idle => vec![Control::Start, Control::Reset, Control::Settings],
        }
    }

    /// Mark the countdown as running. Resumes from the current remaining time.
    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
    }

    /// Stop counting but keep the remaining time. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.paused = true;
        true
    }

    /// Return to an idle focus phase
    pub fn reset(&mut self) {
        self.phase = Phase::Focus;
        self.remaining_seconds = self.durations.focus;
        self.running = false;
        self.paused = false;
    }

    /// Move to the next phase of the cycle and stop
    pub fn advance_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        self.remaining_seconds = self.current_duration();
        self.running = false;
        self.paused = false;
        self.phase
    }

    /// Change a phase length; the active phase restarts its countdown.
    pub fn set_duration(&mut self, phase: Phase, minutes: PhaseMinutes) {
        self.durations.set(phase, minutes);
        if phase == self.phase {
            self.remaining_seconds = self.current_duration();
        }
    }

    pub fn toggle_settings(&mut self) -> bool {
        self.settings_visible = !self.settings_visible;
        self.settings_visible
    }

    /// Apply one second of countdown.
    ///
    /// A tick that finds the countdown already at zero completes the phase.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Stopped;
        }
        match self.remaining_seconds.checked_sub(1) {
            Some(remaining) => {
                self.remaining_seconds = remaining;
                TickOutcome::Counted(remaining)
            }
            None => TickOutcome::PhaseComplete(self.advance_phase()),
        }
    }

    /// Remaining share of the active phase, from 100 down to 0
    pub fn progress_percent(&self) -> f64 {
        let total = self.current_duration();
        if total == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / total as f64 * 100.0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}
