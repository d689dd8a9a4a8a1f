//! Background tasks module
//! 
//! This module contains the countdown task spawned by the timer engine.

pub mod countdown;

// Re-export main items
pub use countdown::{countdown_task, ticks, TICK_INTERVAL};
