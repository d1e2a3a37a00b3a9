//! Timer error types

/// Errors raised by timer state operations
#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    #[error("Invalid duration: {minutes} minutes (must be between 1 and {max})")]
    InvalidMinutes { minutes: u64, max: u64 },

    #[error("Unknown phase '{0}' (expected focus, short-break or long-break)")]
    UnknownPhase(String),

    #[error("Failed to lock {what}: {message}")]
    LockPoisoned { what: &'static str, message: String },
}

impl TimerError {
    /// Whether the error was caused by bad client input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TimerError::InvalidMinutes { .. } | TimerError::UnknownPhase(_)
        )
    }

    pub(crate) fn poisoned(what: &'static str, err: impl std::fmt::Display) -> Self {
        TimerError::LockPoisoned {
            what,
            message: err.to_string(),
        }
    }
}
