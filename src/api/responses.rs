//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Control, Phase, PhaseDurations, TimerState, TimerStatus},
    utils::format_time,
};

/// Body of PUT /durations/{phase}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: u64,
}

/// Length of one phase in both units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEntry {
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationEntry {
    fn from_seconds(seconds: u64) -> Self {
        Self {
            minutes: seconds / 60,
            seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsView {
    pub focus: DurationEntry,
    pub short_break: DurationEntry,
    pub long_break: DurationEntry,
}

impl From<&PhaseDurations> for DurationsView {
    fn from(durations: &PhaseDurations) -> Self {
        Self {
            focus: DurationEntry::from_seconds(durations.focus),
            short_break: DurationEntry::from_seconds(durations.short_break),
            long_break: DurationEntry::from_seconds(durations.long_break),
        }
    }
}

/// Everything a front-end needs to render the timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub phase: Phase,
    pub phase_label: String,
    pub remaining_seconds: u64,
    /// Countdown as `MM:SS`
    pub display: String,
    /// Remaining share of the phase, 100 down to 0
    pub progress_percent: f64,
    pub status: TimerStatus,
    pub running: bool,
    pub paused: bool,
    pub settings_visible: bool,
    pub durations: DurationsView,
    pub controls: Vec<Control>,
}

impl From<&TimerState> for TimerView {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            phase_label: state.phase.label().to_string(),
            remaining_seconds: state.remaining_seconds,
            display: format_time(state.remaining_seconds),
            progress_percent: state.progress_percent(),
            status: state.status(),
            running: state.running,
            paused: state.paused,
            settings_visible: state.settings_visible,
            durations: DurationsView::from(&state.durations),
            controls: state.controls(),
        }
    }
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a successful response carrying the updated timer
    pub fn ok(message: impl Into<String>, timer: &TimerState) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer: TimerView::from(timer),
        }
    }
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub timer: TimerView,
    /// Whether a tick task is currently scheduled
    pub ticking: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_derives_display_fields() {
        let mut state = TimerState::default();
        state.remaining_seconds = 750;
        let view = TimerView::from(&state);
        assert_eq!(view.display, "12:30");
        assert_eq!(view.progress_percent, 50.0);
        assert_eq!(view.phase_label, "Focus");
        assert_eq!(view.durations.short_break.minutes, 5);
        assert_eq!(view.durations.long_break.seconds, 900);
    }

    #[test]
    fn view_serializes_enums_in_lowercase() {
        let json = serde_json::to_value(TimerView::from(&TimerState::default())).unwrap();
        assert_eq!(json["phase"], "focus");
        assert_eq!(json["status"], "idle");
        assert_eq!(json["controls"], serde_json::json!(["start", "reset", "settings"]));
    }
}
