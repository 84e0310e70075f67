//! Interrupt handlers as objects.
//!
//! A platform's external interrupt service calls plain `fn()` callbacks with
//! no context. This crate lets an object receive those interrupts instead,
//! for several pins at once, each with its own trigger, all funnelled into
//! one [`InterruptHandler::fired`] that is told which pin fired.
//!
//! - [`interrupt_lines!`] declares a fixed list of (pin, trigger) pairs. The
//!   list gets a [`HandlerSlot`] and one trampoline per pin.
//! - [`IsrHandler`] wraps a handler object. `begin()` installs it in the
//!   slot and attaches every pin; `end()` (or drop) clears the slot and
//!   detaches them.
//!
//! At most one handler per list is active. A second `begin()` reports
//! `false` and leaves the first in place.
//!
//! # Usage Example
//!
//! ```no_run
//! use core::pin::Pin;
//! use core::sync::atomic::{AtomicU32, Ordering};
//! use isr::{InterruptHandler, IsrHandler, PinNumber, TriggerMode, interrupt_lines};
//!
//! interrupt_lines! {
//!     static DOOR_SENSORS = [(17, TriggerMode::BothEdges), (27, TriggerMode::BothEdges)];
//! }
//!
//! struct DoorCounter(AtomicU32);
//!
//! impl InterruptHandler for DoorCounter {
//!     fn fired(&self, _pin: PinNumber) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//!
//! static DOORS: IsrHandler<DoorCounter> =
//!     IsrHandler::new(&DOOR_SENSORS, DoorCounter(AtomicU32::new(0)));
//!
//! Pin::static_ref(&DOORS).begin();
//! ```

#![cfg_attr(not(test), no_std)]

mod binding;
mod error;
mod handler;
mod macros;
mod registry;

pub use binding::{InterruptLines, LineBinding};
pub use error::BindError;
pub use handler::{InterruptHandler, IsrHandler};
pub use registry::HandlerSlot;

pub use drivers::hal::interrupt::{PinNumber, TriggerMode};
pub use drivers::platform::{CurrentPlatform, Platform};
