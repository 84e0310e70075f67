//! Platform Abstraction Layer
//!
//! Each platform (BCM2835, the host simulator) implements [`Platform`] and
//! [`ExternalInterrupts`]. Exactly one of them is selected as
//! [`CurrentPlatform`] by Cargo feature.
//!
//! # Usage
//!
//! ```rust,ignore
//! use drivers::platform::{CurrentPlatform, Platform};
//!
//! // Once, during boot
//! unsafe { CurrentPlatform::init_interrupts(); }
//!
//! // From the IRQ vector, when the external interrupt IRQ is pending
//! CurrentPlatform::dispatch_pending();
//! ```

use crate::hal::interrupt::ExternalInterrupts;
use common::sync::irq::IrqControl;

pub mod bcm2835;
pub mod sim;

/// Platform trait - implemented by each supported platform
pub trait Platform: ExternalInterrupts {
    /// Interrupt masking used for state shared with interrupt context.
    type Irq: IrqControl + 'static;

    /// Platform name for debugging
    fn name() -> &'static str;

    /// Initialize the interrupt controller and external interrupt routing.
    ///
    /// # Safety
    /// Must only be called once, before any line is attached.
    unsafe fn init_interrupts();

    /// Run the callbacks of every external line with a latched event.
    ///
    /// Called from interrupt context. Returns the number of callbacks run.
    fn dispatch_pending() -> usize;
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "sim")] {
        pub use sim::SimPlatform as CurrentPlatform;
    } else if #[cfg(feature = "bcm2835")] {
        pub use bcm2835::Bcm2835Platform as CurrentPlatform;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features bcm2835\n\
            Or:  cargo build --features sim"
        );
    }
}
