//! Countdown Clock - a single-screen countdown timer engine
//! 
//! This library provides the digit wheels used to dial in a duration, the
//! countdown engine that ticks once per second and publishes state
//! snapshots, the render model a presentation layer draws from, and an HTTP
//! adapter exposing the engine's commands and snapshot stream.

pub mod config;
pub mod state;
pub mod view;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, DigitWheels, TimerEngine, TimerState};
pub use view::ClockView;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
