//! State management module
//! 
//! This module contains the digit wheels, the timer state snapshot, the
//! engine that drives it and the application state shared with the HTTP layer.

pub mod digit_wheels;
pub mod timer_state;
pub mod timer_engine;
pub mod app_state;

// Re-export main types
pub use digit_wheels::DigitWheels;
pub use timer_state::TimerState;
pub use timer_engine::{TimerEngine, Transition};
pub use app_state::AppState;
