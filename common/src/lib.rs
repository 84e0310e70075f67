//! Shared low-level building blocks.
//!
//! - [`sync`]: interrupt masking and the locks built on top of it
//! - [`arch`]: per-architecture [`IrqControl`](sync::irq::IrqControl) backends

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod sync;
