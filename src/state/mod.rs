//! State management module
//!
//! This module contains the timer data model, its transitions and the
//! application state that owns the tick source.

pub mod app_state;
pub mod durations;
pub mod errors;
pub mod phase;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use durations::{PhaseDurations, PhaseMinutes, MAX_PHASE_MINUTES};
pub use errors::TimerError;
pub use phase::Phase;
pub use timer_state::{Control, TickOutcome, TimerState, TimerStatus};
