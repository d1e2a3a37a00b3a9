//! Background tasks module
//!
//! This module contains the background task that drives the countdown.

pub mod phase_ticker;

// Re-export main functions
pub use phase_ticker::{phase_ticker_task, TICK_PERIOD};
