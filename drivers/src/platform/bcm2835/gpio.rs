//! BCM2835 GPIO block, reduced to input select and event detection.

use core::ptr::{read_volatile, write_volatile};

use crate::hal::gpio::{EventDetect, Sense};

pub const GPIO_BASE: usize = 0x2020_0000;

/// Pins 0-53.
pub const PIN_COUNT: u8 = 54;

/// Two-word registers hold pins 0-31 in bank 0 and 32-53 in bank 1.
pub const BANKS: usize = 2;

#[repr(C)]
struct Registers {
    gpfsel: [u32; 6],
    _reserved0: u32,
    _gpset: [u32; BANKS],
    _reserved1: u32,
    _gpclr: [u32; BANKS],
    _reserved2: u32,
    _gplev: [u32; BANKS],
    _reserved3: u32,
    gpeds: [u32; BANKS],
    _reserved4: u32,
    gpren: [u32; BANKS],
    _reserved5: u32,
    gpfen: [u32; BANKS],
    _reserved6: u32,
    gphen: [u32; BANKS],
    _reserved7: u32,
    gplen: [u32; BANKS],
}

const fn block() -> *mut Registers {
    GPIO_BASE as *mut Registers
}

/// Where a pin lives in the banked registers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Bit {
    bank: usize,
    mask: u32,
}

impl Bit {
    fn of(pin: u8) -> Result<Self, GpioError> {
        if pin >= PIN_COUNT {
            return Err(GpioError::InvalidPin);
        }
        Ok(Self {
            bank: usize::from(pin / 32),
            mask: 1 << (pin % 32),
        })
    }
}

/// Read-modify-write of one register.
///
/// # Safety
///
/// `reg` must point into the mapped GPIO block.
unsafe fn modify(reg: *mut u32, f: impl FnOnce(u32) -> u32) {
    unsafe { write_volatile(reg, f(read_volatile(reg))) }
}

/// Select the input function (`0b000`) for `pin`.
pub fn make_input(pin: u8) -> Result<(), GpioError> {
    Bit::of(pin)?;
    let word = usize::from(pin / 10);
    let shift = u32::from(pin % 10) * 3;

    unsafe { modify(&raw mut (*block()).gpfsel[word], |v| v & !(0b111 << shift)) };
    Ok(())
}

/// Latched events of one bank, a bit per pin.
pub fn pending_events(bank: usize) -> u32 {
    unsafe { read_volatile(&raw const (*block()).gpeds[bank]) }
}

/// Clear the latched event of `pin`. GPEDS is write-1-to-clear.
pub fn ack_event(pin: u8) -> Result<(), GpioError> {
    let bit = Bit::of(pin)?;
    unsafe { write_volatile(&raw mut (*block()).gpeds[bit.bank], bit.mask) };
    Ok(())
}

/// Program all four detect-enable registers of `pin` from `sense`.
pub fn program_sense(pin: u8, sense: Sense) -> Result<(), GpioError> {
    let bit = Bit::of(pin)?;
    let r = block();

    unsafe {
        let enables = [
            (&raw mut (*r).gpren[bit.bank], sense.rising),
            (&raw mut (*r).gpfen[bit.bank], sense.falling),
            (&raw mut (*r).gphen[bit.bank], sense.high),
            (&raw mut (*r).gplen[bit.bank], sense.low),
        ];
        for (reg, on) in enables {
            modify(reg, |v| if on { v | bit.mask } else { v & !bit.mask });
        }
    }
    Ok(())
}

/// Handle on the GPIO block for the HAL traits.
#[derive(Debug)]
pub struct Bcm2835Gpio;

impl Bcm2835Gpio {
    /// # Safety
    ///
    /// The GPIO block must be mapped at [`GPIO_BASE`].
    pub const unsafe fn new() -> Self {
        Self
    }
}

impl EventDetect for Bcm2835Gpio {
    type Pin = u8;
    type Error = GpioError;

    fn set_sense(&mut self, pin: u8, sense: Sense) -> Result<(), GpioError> {
        program_sense(pin, sense)
    }

    fn clear_event(&mut self, pin: u8) -> Result<(), GpioError> {
        ack_event(pin)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// Pin 54 or above.
    InvalidPin,
}
