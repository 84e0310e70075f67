//! Declared (pin, trigger) pairs and the hardware registrations made from
//! them.

use core::marker::PhantomData;

use drivers::hal::interrupt::{InterruptLine, Isr, PinNumber, TriggerMode};
use drivers::platform::Platform;

use crate::error::BindError;
use crate::registry::HandlerSlot;

/// One declared pin, its trigger and the trampoline that forwards it.
///
/// The trampoline has the pin baked in; platforms give callbacks no
/// argument to carry it.
#[derive(Debug, Copy, Clone)]
pub struct LineBinding {
    pin: PinNumber,
    mode: TriggerMode,
    isr: Isr,
}

impl LineBinding {
    #[doc(hidden)]
    pub const fn new(pin: PinNumber, mode: TriggerMode, isr: Isr) -> Self {
        Self { pin, mode, isr }
    }

    pub const fn pin(&self) -> PinNumber {
        self.pin
    }

    pub const fn mode(&self) -> TriggerMode {
        self.mode
    }
}

/// A fixed binding list together with its handler slot.
///
/// Declared with [`interrupt_lines!`](crate::interrupt_lines). The `static`
/// it declares is the list's identity: handlers built on the same list
/// compete for the same slot.
pub struct InterruptLines<P: Platform> {
    slot: &'static HandlerSlot<P::Irq>,
    bindings: &'static [LineBinding],
    _platform: PhantomData<fn() -> P>,
}

impl<P: Platform> InterruptLines<P> {
    #[doc(hidden)]
    pub const fn new(slot: &'static HandlerSlot<P::Irq>, bindings: &'static [LineBinding]) -> Self {
        assert!(!bindings.is_empty(), "an interrupt line list cannot be empty");
        Self {
            slot,
            bindings,
            _platform: PhantomData,
        }
    }

    /// The declared pairs, in declaration order.
    pub fn bindings(&self) -> &'static [LineBinding] {
        self.bindings
    }

    /// Whether some handler currently owns this list.
    pub fn is_bound(&self) -> bool {
        self.slot.is_occupied()
    }

    pub(crate) fn slot(&self) -> &'static HandlerSlot<P::Irq> {
        self.slot
    }

    fn line(binding: &LineBinding) -> Result<InterruptLine, BindError<P::Error>> {
        P::pin_to_interrupt(binding.pin).ok_or(BindError::NotAnInterrupt(binding.pin))
    }

    /// Fail if any declared pin has no interrupt line.
    pub(crate) fn check(&self) -> Result<(), BindError<P::Error>> {
        self.bindings.iter().try_for_each(|b| Self::line(b).map(drop))
    }

    /// Attach every binding in order.
    ///
    /// On failure, returns how many bindings were attached before the one
    /// that failed, so the caller can undo exactly those.
    pub(crate) fn attach(&self) -> Result<(), (usize, BindError<P::Error>)> {
        for (attached, binding) in self.bindings.iter().enumerate() {
            let line = Self::line(binding).map_err(|e| (attached, e))?;
            P::attach(line, binding.isr, binding.mode).map_err(|error| {
                (
                    attached,
                    BindError::Attach {
                        pin: binding.pin,
                        error,
                    },
                )
            })?;
        }
        Ok(())
    }

    /// Detach the first `count` bindings.
    ///
    /// Keeps going past failures and reports the first one.
    pub(crate) fn detach(&self, count: usize) -> Result<(), BindError<P::Error>> {
        let mut first_error = None;

        for binding in self.bindings.iter().take(count) {
            let result = Self::line(binding).and_then(|line| {
                P::detach(line).map_err(|error| BindError::Detach {
                    pin: binding.pin,
                    error,
                })
            });
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
