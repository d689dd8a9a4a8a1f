//! Render model for the clock face and its controls

use serde::{Deserialize, Serialize};

use crate::state::{DigitWheels, TimerState};

/// Angle the progress arc starts from, in degrees
pub const ARC_START_ANGLE: f32 = 270.0;

/// What the single start/stop button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Start,
    Stop,
}

/// Everything needed to draw one frame of the clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockView {
    /// Digital readout, e.g. `"1:05"`
    pub readout: String,
    /// Remaining fraction of the countdown in `[0, 1]`
    pub progress: f32,
    pub start_angle: f32,
    /// Arc length in degrees; grows from 0 to 360 as time elapses
    pub sweep_angle: f32,
    /// Whether the wheel buttons accept presses
    pub controls_enabled: bool,
    pub primary_action: PrimaryAction,
}

impl ClockView {
    pub fn from_state(state: &TimerState) -> Self {
        let progress = state.progress().clamp(0.0, 1.0);
        let idle = state.is_idle();

        Self {
            readout: format_readout(&state.display_wheels()),
            progress,
            start_angle: ARC_START_ANGLE,
            sweep_angle: (1.0 - progress) * 360.0,
            controls_enabled: idle,
            primary_action: if idle { PrimaryAction::Start } else { PrimaryAction::Stop },
        }
    }
}

impl From<&TimerState> for ClockView {
    fn from(state: &TimerState) -> Self {
        Self::from_state(state)
    }
}

/// Format wheels as `m:ts` with no leading zero on the minutes
pub fn format_readout(wheels: &DigitWheels) -> String {
    format!("{}:{}{}", wheels.minutes(), wheels.tens_seconds(), wheels.units_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_format() {
        assert_eq!(format_readout(&DigitWheels::ZERO), "0:00");
        assert_eq!(format_readout(&DigitWheels::new(1, 0, 5).unwrap()), "1:05");
        assert_eq!(format_readout(&DigitWheels::new(5, 5, 9).unwrap()), "5:59");
    }

    #[test]
    fn test_idle_view() {
        let state = TimerState::idle(DigitWheels::new(2, 3, 0).unwrap());
        let view = ClockView::from_state(&state);

        assert_eq!(view.readout, "2:30");
        assert_eq!(view.progress, 1.0);
        assert_eq!(view.sweep_angle, 0.0);
        assert_eq!(view.start_angle, 270.0);
        assert!(view.controls_enabled);
        assert_eq!(view.primary_action, PrimaryAction::Start);
    }

    #[test]
    fn test_running_view_counts_down() {
        let state = TimerState::Running {
            total_seconds: 20,
            remaining_seconds: 5,
            configured: DigitWheels::new(0, 2, 0).unwrap(),
        };
        let view = ClockView::from(&state);

        assert_eq!(view.readout, "0:05");
        assert_eq!(view.progress, 0.25);
        assert_eq!(view.sweep_angle, 270.0);
        assert!(!view.controls_enabled);
        assert_eq!(view.primary_action, PrimaryAction::Stop);
    }

    #[test]
    fn test_view_serializes_action_in_snake_case() {
        let view = ClockView::from_state(&TimerState::new());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["primary_action"], "start");
        assert_eq!(json["readout"], "0:00");
    }
}
