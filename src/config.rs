//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{PhaseDurations, PhaseMinutes, TimerError};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomo-timer")]
#[command(about = "A state-managed HTTP server driving a focus/break phase timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, env = "POMO_PORT", default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "POMO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Focus phase length in minutes
    #[arg(short, long, env = "POMO_FOCUS", default_value = "25")]
    pub focus: u64,

    /// Short break length in minutes
    #[arg(short, long, env = "POMO_SHORT_BREAK", default_value = "5")]
    pub short_break: u64,

    /// Long break length in minutes
    #[arg(short, long, env = "POMO_LONG_BREAK", default_value = "15")]
    pub long_break: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validate the configured phase lengths
    pub fn durations(&self) -> Result<PhaseDurations, TimerError> {
        Ok(PhaseDurations::from_minutes(
            PhaseMinutes::new(self.focus)?,
            PhaseMinutes::new(self.short_break)?,
            PhaseMinutes::new(self.long_break)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_classic_durations() {
        let config = Config::try_parse_from(["pomo-timer"]).unwrap();
        assert_eq!(config.durations().unwrap(), PhaseDurations::default());
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn custom_minutes_and_verbose() {
        let config = Config::try_parse_from([
            "pomo-timer", "--focus", "50", "--short-break", "10", "--long-break", "30", "-v",
        ])
        .unwrap();
        let durations = config.durations().unwrap();
        assert_eq!(durations.focus, 3000);
        assert_eq!(durations.short_break, 600);
        assert_eq!(durations.long_break, 1800);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_minutes_is_rejected() {
        let config = Config::try_parse_from(["pomo-timer", "--focus", "0"]).unwrap();
        assert!(matches!(
            config.durations(),
            Err(TimerError::InvalidMinutes { minutes: 0, .. })
        ));
    }

    #[test]
    fn negative_minutes_fail_to_parse() {
        assert!(Config::try_parse_from(["pomo-timer", "--focus", "-5"]).is_err());
    }
}
