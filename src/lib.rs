//! Pomo Timer - A state-managed HTTP server driving a focus/break phase timer
//!
//! This library provides the phase timer state machine, the one-second tick
//! task that drives it and the HTTP control surface around it.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Phase, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
