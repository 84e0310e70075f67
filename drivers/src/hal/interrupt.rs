//! Interrupt Controller Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for interrupt management:
//! the SoC-level controller that masks whole IRQ lines, and the external
//! interrupt service that routes a pin event to a callback.

use crate::hal::gpio::Sense;

/// Interrupt number type.
pub type IrqNumber = u32;

/// Logical pin number as the application names it.
pub type PinNumber = u8;

/// External interrupt line as the platform's controller names it.
///
/// Obtained from a [`PinNumber`] with [`ExternalInterrupts::pin_to_interrupt`].
pub type InterruptLine = u8;

/// Callback run in interrupt context when an external line fires.
///
/// There is no user-data argument; whatever the callback needs must be
/// reachable from a `static`.
pub type Isr = fn();

/// Interrupt controller trait.
///
/// This trait represents the system's interrupt controller.
pub trait InterruptController {
    /// Error type for interrupt controller operations.
    type Error: core::fmt::Debug;

    /// Enable (unmask) an interrupt line.
    fn enable(&mut self, irq: IrqNumber) -> Result<(), Self::Error>;
}

/// Pin condition that raises a line's interrupt.
///
/// Level modes keep firing for as long as the level holds, so a level
/// handler has to remove the cause before returning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerMode {
    RisingEdge,
    FallingEdge,
    /// Either edge.
    BothEdges,
    LevelHigh,
    LevelLow,
}

impl TriggerMode {
    /// GPIO event conditions that implement this trigger.
    pub fn sense(self) -> Sense {
        let none = Sense::NONE;
        match self {
            TriggerMode::RisingEdge => Sense { rising: true, ..none },
            TriggerMode::FallingEdge => Sense { falling: true, ..none },
            TriggerMode::BothEdges => Sense {
                rising: true,
                falling: true,
                ..none
            },
            TriggerMode::LevelHigh => Sense { high: true, ..none },
            TriggerMode::LevelLow => Sense { low: true, ..none },
        }
    }
}

/// External (pin) interrupt service of a platform.
///
/// Functions are associated rather than methods: the service is a
/// process-wide singleton and must be reachable from `Drop` impls and other
/// places that have no handle to pass around.
pub trait ExternalInterrupts {
    /// Error type for attach/detach.
    type Error: core::fmt::Debug;

    /// Translate a pin into the line it raises, or `None` if the pin cannot
    /// interrupt.
    fn pin_to_interrupt(pin: PinNumber) -> Option<InterruptLine>;

    /// Run `isr` whenever `line` fires under `mode`.
    ///
    /// Replaces any callback already attached to `line`.
    fn attach(line: InterruptLine, isr: Isr, mode: TriggerMode) -> Result<(), Self::Error>;

    /// Stop delivering `line`. Detaching an unattached line is not an error.
    fn detach(line: InterruptLine) -> Result<(), Self::Error>;
}
