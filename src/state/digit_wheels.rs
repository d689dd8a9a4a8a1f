//! Digit wheels used to dial in a countdown duration

use serde::{Deserialize, Serialize};

/// Highest value on the minutes wheel
pub const MAX_MINUTES: u8 = 5;
/// Highest value on the tens-of-seconds wheel
pub const MAX_TENS_SECONDS: u8 = 5;
/// Highest value on the units-of-seconds wheel
pub const MAX_UNITS_SECONDS: u8 = 9;
/// Longest duration the wheels can encode (5:59)
pub const MAX_TOTAL_SECONDS: u32 =
    MAX_MINUTES as u32 * 60 + MAX_TENS_SECONDS as u32 * 10 + MAX_UNITS_SECONDS as u32;

/// The three bounded counters that encode a configured duration.
///
/// Every operation returns a new value; the wheels are never mutated in place,
/// so a half-applied borrow can never be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitWheels {
    minutes: u8,
    tens_seconds: u8,
    units_seconds: u8,
}

impl DigitWheels {
    /// All wheels at zero
    pub const ZERO: Self = Self {
        minutes: 0,
        tens_seconds: 0,
        units_seconds: 0,
    };

    /// Create wheels from explicit values, rejecting out-of-range digits
    pub fn new(minutes: u8, tens_seconds: u8, units_seconds: u8) -> Option<Self> {
        if minutes > MAX_MINUTES || tens_seconds > MAX_TENS_SECONDS || units_seconds > MAX_UNITS_SECONDS {
            return None;
        }
        Some(Self {
            minutes,
            tens_seconds,
            units_seconds,
        })
    }

    /// Split a number of seconds across the wheels
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        if seconds > MAX_TOTAL_SECONDS {
            return None;
        }
        Some(Self {
            minutes: (seconds / 60) as u8,
            tens_seconds: ((seconds % 60) / 10) as u8,
            units_seconds: (seconds % 10) as u8,
        })
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn tens_seconds(&self) -> u8 {
        self.tens_seconds
    }

    pub fn units_seconds(&self) -> u8 {
        self.units_seconds
    }

    /// Total duration encoded by the wheels, recomputed on every call
    pub fn total_seconds(&self) -> u32 {
        self.minutes as u32 * 60 + self.tens_seconds as u32 * 10 + self.units_seconds as u32
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn increment_minutes(self) -> Self {
        Self {
            minutes: wrap_increment(self.minutes, MAX_MINUTES),
            ..self
        }
    }

    pub fn increment_tens_seconds(self) -> Self {
        Self {
            tens_seconds: wrap_increment(self.tens_seconds, MAX_TENS_SECONDS),
            ..self
        }
    }

    pub fn increment_units_seconds(self) -> Self {
        Self {
            units_seconds: wrap_increment(self.units_seconds, MAX_UNITS_SECONDS),
            ..self
        }
    }

    /// Take exactly one second off the wheels.
    ///
    /// Units borrow from tens, tens borrow from minutes. Returns `None` when
    /// the wheels already read `0:00`.
    pub fn decrement(self) -> Option<Self> {
        if self.units_seconds > 0 {
            return Some(Self {
                units_seconds: self.units_seconds - 1,
                ..self
            });
        }
        if self.tens_seconds > 0 {
            return Some(Self {
                tens_seconds: self.tens_seconds - 1,
                units_seconds: MAX_UNITS_SECONDS,
                ..self
            });
        }
        if self.minutes > 0 {
            return Some(Self {
                minutes: self.minutes - 1,
                tens_seconds: MAX_TENS_SECONDS,
                units_seconds: MAX_UNITS_SECONDS,
            });
        }
        None
    }
}

fn wrap_increment(value: u8, max: u8) -> u8 {
    if value >= max { 0 } else { value + 1 }
}
