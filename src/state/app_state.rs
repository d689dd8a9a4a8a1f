//! Application state shared with the HTTP handlers

use std::{
    sync::{Mutex, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{timer_engine::Transition, TimerEngine};

/// Command issued by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncrementMinutes,
    IncrementTensSeconds,
    IncrementUnitsSeconds,
    Start,
    Stop,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IncrementMinutes => "minutes",
            Self::IncrementTensSeconds => "tens",
            Self::IncrementUnitsSeconds => "units",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Main application state: the engine plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create a new AppState with an idle engine
    pub fn new(port: u16, host: String) -> Self {
        Self {
            engine: TimerEngine::new(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Run a command against the engine and return the state it left behind
    pub fn apply(&self, command: Command) -> Transition {
        let transition = match command {
            Command::IncrementMinutes => self.engine.increment_minutes(),
            Command::IncrementTensSeconds => self.engine.increment_tens_seconds(),
            Command::IncrementUnitsSeconds => self.engine.increment_units_seconds(),
            Command::Start => self.engine.start(),
            Command::Stop => self.engine.stop(),
        };

        info!(
            "Command {} applied, clock went {} -> {}",
            command.name(),
            transition.before.status_label(),
            transition.after.status_label()
        );

        *self.last_action.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((command.name().to_string(), Utc::now()));

        transition
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last command information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DigitWheels, TimerState};

    #[test]
    fn test_apply_records_last_action() {
        let state = AppState::new(20560, "127.0.0.1".to_string());
        assert_eq!(state.get_last_action(), (None, None));

        let transition = state.apply(Command::IncrementMinutes);
        assert_eq!(transition.before, TimerState::new());
        assert_eq!(transition.after, TimerState::idle(DigitWheels::new(1, 0, 0).unwrap()));

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("minutes"));
        assert!(time.is_some());
    }

    #[test]
    fn test_uptime_starts_in_seconds() {
        let state = AppState::new(20560, "127.0.0.1".to_string());
        assert!(state.get_uptime().ends_with('s'));
    }
}
