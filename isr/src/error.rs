use core::fmt;

use drivers::hal::interrupt::PinNumber;

/// A platform refused to route one of the declared pins.
///
/// `E` is the platform's [`ExternalInterrupts::Error`](drivers::ExternalInterrupts::Error).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BindError<E> {
    /// The pin has no interrupt line on this platform.
    NotAnInterrupt(PinNumber),
    /// Attaching the pin's line failed.
    Attach { pin: PinNumber, error: E },
    /// Detaching the pin's line failed.
    Detach { pin: PinNumber, error: E },
}

impl<E> BindError<E> {
    /// The pin the failure is about.
    pub fn pin(&self) -> PinNumber {
        match *self {
            BindError::NotAnInterrupt(pin)
            | BindError::Attach { pin, .. }
            | BindError::Detach { pin, .. } => pin,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for BindError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::NotAnInterrupt(pin) => write!(f, "pin {} cannot raise interrupts", pin),
            BindError::Attach { pin, error } => write!(f, "attaching pin {} failed: {:?}", pin, error),
            BindError::Detach { pin, error } => write!(f, "detaching pin {} failed: {:?}", pin, error),
        }
    }
}
