//! Validated phase durations

use serde::{Deserialize, Serialize};

use super::{Phase, TimerError};

/// Longest allowed phase, in minutes
pub const MAX_PHASE_MINUTES: u64 = 24 * 60;

pub const DEFAULT_FOCUS_MINUTES: u64 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u64 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u64 = 15;

/// A phase length in whole minutes, always within `1..=MAX_PHASE_MINUTES`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMinutes(u64);

impl PhaseMinutes {
    pub fn new(minutes: u64) -> Result<Self, TimerError> {
        if minutes == 0 || minutes > MAX_PHASE_MINUTES {
            return Err(TimerError::InvalidMinutes {
                minutes,
                max: MAX_PHASE_MINUTES,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u64 {
        self.0
    }

    pub fn seconds(self) -> u64 {
        self.0 * 60
    }
}

/// Configured length of every phase, stored in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub focus: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl PhaseDurations {
    /// Build durations from already validated minute values
    pub fn from_minutes(focus: PhaseMinutes, short_break: PhaseMinutes, long_break: PhaseMinutes) -> Self {
        Self {
            focus: focus.seconds(),
            short_break: short_break.seconds(),
            long_break: long_break.seconds(),
        }
    }

    /// Length of a phase in seconds
    pub fn of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    /// Replace the length of a phase
    pub fn set(&mut self, phase: Phase, minutes: PhaseMinutes) {
        let slot = match phase {
            Phase::Focus => &mut self.focus,
            Phase::ShortBreak => &mut self.short_break,
            Phase::LongBreak => &mut self.long_break,
        };
        *slot = minutes.seconds();
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS_MINUTES * 60,
            short_break: DEFAULT_SHORT_BREAK_MINUTES * 60,
            long_break: DEFAULT_LONG_BREAK_MINUTES * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let durations = PhaseDurations::default();
        assert_eq!(durations.of(Phase::Focus), 1500);
        assert_eq!(durations.of(Phase::ShortBreak), 300);
        assert_eq!(durations.of(Phase::LongBreak), 900);
    }

    #[test]
    fn rejects_zero_and_oversized_minutes() {
        assert!(matches!(
            PhaseMinutes::new(0),
            Err(TimerError::InvalidMinutes { minutes: 0, .. })
        ));
        assert!(PhaseMinutes::new(MAX_PHASE_MINUTES + 1).is_err());
        assert_eq!(PhaseMinutes::new(MAX_PHASE_MINUTES).unwrap().minutes(), MAX_PHASE_MINUTES);
    }

    #[test]
    fn set_only_touches_one_phase() {
        let mut durations = PhaseDurations::default();
        durations.set(Phase::ShortBreak, PhaseMinutes::new(7).unwrap());
        assert_eq!(durations.short_break, 420);
        assert_eq!(durations.focus, 1500);
        assert_eq!(durations.long_break, 900);
    }
}
