//! Timer phases and their cycle order

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use super::TimerError;

/// Stage of the focus/break cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// All phases in cycle order
    pub const ALL: [Phase; 3] = [Phase::Focus, Phase::ShortBreak, Phase::LongBreak];

    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::ShortBreak,
            Phase::ShortBreak => Phase::LongBreak,
            Phase::LongBreak => Phase::Focus,
        }
    }

    /// Identifier used in URLs and JSON bodies
    pub fn id(self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::ShortBreak => "short-break",
            Phase::LongBreak => "long-break",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.id() == s)
            .ok_or_else(|| TimerError::UnknownPhase(s.to_string()))
    }
}
