//! Hardware Driver Subsystem
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions
//! - [`platform`]: Platform-specific drivers (SoC level, plus a host simulator)
//!
//! # Usage Example
//!
//! ```no_run
//! use drivers::hal::interrupt::{ExternalInterrupts, TriggerMode};
//! use drivers::platform::sim::SimPlatform;
//!
//! fn on_button() {}
//!
//! let line = SimPlatform::pin_to_interrupt(2).unwrap();
//! SimPlatform::attach(line, on_button, TriggerMode::FallingEdge).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod platform;

// Re-export commonly used types
pub use hal::gpio::PinLevel;
pub use hal::interrupt::{ExternalInterrupts, InterruptController, TriggerMode};
pub use platform::{CurrentPlatform, Platform};
