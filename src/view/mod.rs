//! Presentation contract module
//! 
//! Everything a renderer needs to draw the clock, derived from a snapshot.

pub mod clock_view;

pub use clock_view::{format_readout, ClockView, PrimaryAction};
