//! GPIO as far as external interrupts need it: pin levels and the conditions
//! that latch an event on a pin.

/// Logic level on a pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Conditions that latch an event on a pin.
///
/// Any combination may be enabled; an event latches when at least one of
/// them holds. [`Sense::NONE`] turns detection off.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Sense {
    /// Low to high transition.
    pub rising: bool,
    /// High to low transition.
    pub falling: bool,
    /// Pin reads high.
    pub high: bool,
    /// Pin reads low.
    pub low: bool,
}

impl Sense {
    pub const NONE: Sense = Sense {
        rising: false,
        falling: false,
        high: false,
        low: false,
    };

    /// Whether moving from `from` to `to` latches an event.
    pub fn matches(self, from: PinLevel, to: PinLevel) -> bool {
        let edge = match (from, to) {
            (PinLevel::Low, PinLevel::High) => self.rising,
            (PinLevel::High, PinLevel::Low) => self.falling,
            _ => false,
        };
        let level = match to {
            PinLevel::High => self.high,
            PinLevel::Low => self.low,
        };
        edge || level
    }
}

/// Event detection for GPIO controllers that can latch pin events.
pub trait EventDetect {
    /// Platform-specific pin identifier.
    type Pin: Copy;

    type Error: core::fmt::Debug;

    /// Replace the conditions that latch events on `pin`.
    fn set_sense(&mut self, pin: Self::Pin, sense: Sense) -> Result<(), Self::Error>;

    /// Acknowledge the latched event on `pin`.
    fn clear_event(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;
}
