//! Timer state snapshot published by the engine

use serde::{Deserialize, Serialize};

use super::DigitWheels;

/// Complete countdown state, replaced whole on every transition.
///
/// A finished countdown is represented as `Idle` with all wheels at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimerState {
    /// Not counting; the wheels hold the configured duration
    Idle { wheels: DigitWheels },
    /// Counting down
    Running {
        total_seconds: u32,
        remaining_seconds: u32,
        /// Wheel values captured at start, kept for display
        configured: DigitWheels,
    },
}

impl TimerState {
    /// Create the initial idle state with all wheels at zero
    pub fn new() -> Self {
        Self::idle(DigitWheels::ZERO)
    }

    /// Create an idle state holding the given wheels
    pub fn idle(wheels: DigitWheels) -> Self {
        Self::Idle { wheels }
    }

    /// Create a freshly started running state for the given wheels
    pub fn started(configured: DigitWheels) -> Self {
        let total_seconds = configured.total_seconds();
        Self::Running {
            total_seconds,
            remaining_seconds: total_seconds,
            configured,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_idle(&self) -> bool {
        !self.is_running()
    }

    /// Remaining seconds, zero when idle
    pub fn remaining_seconds(&self) -> u32 {
        match self {
            Self::Idle { .. } => 0,
            Self::Running { remaining_seconds, .. } => *remaining_seconds,
        }
    }

    /// Wheels showing the time left on the clock.
    ///
    /// Idle shows the configured wheels; running derives them from
    /// `remaining_seconds`.
    pub fn display_wheels(&self) -> DigitWheels {
        match self {
            Self::Idle { wheels } => *wheels,
            Self::Running { remaining_seconds, configured, .. } => {
                DigitWheels::from_seconds(*remaining_seconds).unwrap_or(*configured)
            }
        }
    }

    /// Fraction of the countdown still remaining, 1.0 when idle
    pub fn progress(&self) -> f32 {
        match self {
            Self::Idle { .. } => 1.0,
            Self::Running { total_seconds: 0, .. } => 0.0,
            Self::Running { total_seconds, remaining_seconds, .. } => {
                *remaining_seconds as f32 / *total_seconds as f32
            }
        }
    }

    /// Short label used in responses and logs
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "idle",
            Self::Running { .. } => "running",
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle_with_zero_wheels() {
        let state = TimerState::new();
        assert_eq!(state, TimerState::Idle { wheels: DigitWheels::ZERO });
        assert!(state.is_idle());
        assert_eq!(state.remaining_seconds(), 0);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_started_captures_total() {
        let wheels = DigitWheels::new(0, 1, 5).unwrap();
        let state = TimerState::started(wheels);
        assert_eq!(
            state,
            TimerState::Running {
                total_seconds: 15,
                remaining_seconds: 15,
                configured: wheels,
            }
        );
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_display_wheels_follow_remaining() {
        let state = TimerState::Running {
            total_seconds: 75,
            remaining_seconds: 60,
            configured: DigitWheels::new(1, 1, 5).unwrap(),
        };
        assert_eq!(state.display_wheels(), DigitWheels::new(1, 0, 0).unwrap());
        assert_eq!(state.progress(), 0.8);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let state = TimerState::started(DigitWheels::new(0, 1, 5).unwrap());
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["total_seconds"], 15);
        assert_eq!(json["configured"]["tens_seconds"], 1);

        let idle = serde_json::to_value(TimerState::new()).unwrap();
        assert_eq!(idle["status"], "idle");
        assert_eq!(idle["wheels"]["minutes"], 0);
    }
}
