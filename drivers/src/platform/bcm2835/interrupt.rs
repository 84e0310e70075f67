//! BCM2835 interrupt controller, as far as routing the GPIO IRQs.

use core::ptr::write_volatile;

use crate::hal::interrupt::{InterruptController, IrqNumber};

pub const INT_CONTROLLER_BASE: usize = 0x2000_b000;

/// Raised for an event on any pin. The per-bank GPIO IRQs (49-51) are left
/// masked.
pub const IRQ_GPIO_ALL: IrqNumber = 52;

#[repr(C)]
struct Registers {
    _reserved: [u8; 0x200],
    _pending_basic: u32,
    _pending: [u32; 2],
    _fiq_control: u32,
    enable: [u32; 2],
    enable_basic: u32,
    _disable: [u32; 2],
    _disable_basic: u32,
}

const fn block() -> *mut Registers {
    INT_CONTROLLER_BASE as *mut Registers
}

/// Register group an IRQ number belongs to: the two GPU banks (0-63), then
/// the ARM basic IRQs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Group {
    Gpu(usize),
    Basic,
}

fn locate(irq: IrqNumber) -> (Group, u32) {
    match irq {
        0..=63 => (Group::Gpu((irq / 32) as usize), irq % 32),
        _ => (Group::Basic, irq - 64),
    }
}

/// Enable registers are write-1-to-set, so no read-modify-write is needed.
fn unmask(irq: IrqNumber) {
    let (group, bit) = locate(irq);
    let r = block();

    unsafe {
        let reg = match group {
            Group::Gpu(bank) => &raw mut (*r).enable[bank],
            Group::Basic => &raw mut (*r).enable_basic,
        };
        write_volatile(reg, 1 << bit);
    }
}

#[derive(Debug)]
pub struct Bcm2835InterruptController;

impl Bcm2835InterruptController {
    /// # Safety
    ///
    /// The controller must be mapped at [`INT_CONTROLLER_BASE`].
    pub const unsafe fn new() -> Self {
        Self
    }
}

/// Unmasking a BCM2835 IRQ cannot fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptError {}

impl InterruptController for Bcm2835InterruptController {
    type Error = InterruptError;

    fn enable(&mut self, irq: IrqNumber) -> Result<(), InterruptError> {
        unmask(irq);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_irqs_live_in_the_second_bank() {
        assert_eq!(locate(49), (Group::Gpu(1), 17));
        assert_eq!(locate(IRQ_GPIO_ALL), (Group::Gpu(1), 20));
        assert_eq!(locate(3), (Group::Gpu(0), 3));
        assert_eq!(locate(65), (Group::Basic, 1));
    }
}
