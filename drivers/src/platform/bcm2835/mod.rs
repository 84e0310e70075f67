//! BCM2835 (Raspberry Pi 1/Zero) platform.
//!
//! External interrupts are GPIO event-detect interrupts. Every pin 0-53 is
//! its own line; all of them are funnelled through the any-bank GPIO IRQ,
//! and [`Platform::dispatch_pending`] demultiplexes by scanning `GPEDS`.

pub mod gpio;
pub mod interrupt;

use super::Platform;
use crate::hal::gpio::{EventDetect, Sense};
use crate::hal::interrupt::{
    ExternalInterrupts, InterruptController, InterruptLine, Isr, PinNumber, TriggerMode,
};
use common::arch::CurrentIrq;
use common::sync::IrqSpinLock;
use gpio::{BANKS, Bcm2835Gpio, GpioError, PIN_COUNT};
use interrupt::{Bcm2835InterruptController, IRQ_GPIO_ALL};
use spin::Once;

pub struct Bcm2835Platform;

// ============================================================================
// Internal Platform State (not exposed)
// ============================================================================

/// Set once the GPIO IRQ is routed through the interrupt controller.
static INTERRUPTS_READY: Once = Once::new();

/// Callback per pin. Read from the GPIO IRQ, written by attach/detach.
static TRAMPOLINES: IrqSpinLock<[Option<Isr>; PIN_COUNT as usize], CurrentIrq> =
    IrqSpinLock::new([None; PIN_COUNT as usize]);

fn route_gpio_irq() {
    INTERRUPTS_READY.call_once(|| {
        let mut intc = unsafe { Bcm2835InterruptController::new() };
        intc.enable(IRQ_GPIO_ALL).ok();
        log::debug!("GPIO events routed to IRQ {}", IRQ_GPIO_ALL);
    });
}

fn disable_detection(gpio: &mut Bcm2835Gpio, line: InterruptLine) -> Result<(), GpioError> {
    gpio.set_sense(line, Sense::NONE)?;
    gpio.clear_event(line)
}

impl Platform for Bcm2835Platform {
    type Irq = CurrentIrq;

    fn name() -> &'static str {
        "BCM2835 (Raspberry Pi 1/Zero)"
    }

    unsafe fn init_interrupts() {
        *TRAMPOLINES.lock() = [None; PIN_COUNT as usize];
        route_gpio_irq();
    }

    fn dispatch_pending() -> usize {
        let mut pins = unsafe { Bcm2835Gpio::new() };
        let mut ran = 0;

        for bank in 0..BANKS {
            let mut events = gpio::pending_events(bank);
            while events != 0 {
                let pin = (bank as u32 * 32 + events.trailing_zeros()) as u8;
                events &= events - 1;

                // Acknowledge before running so an edge during the callback latches again
                pins.clear_event(pin).ok();

                let isr = TRAMPOLINES.lock().get(pin as usize).copied().flatten();
                match isr {
                    Some(isr) => {
                        isr();
                        ran += 1;
                    }
                    None => log::warn!("GPIO{} event with nothing attached", pin),
                }
            }
        }

        ran
    }
}

impl ExternalInterrupts for Bcm2835Platform {
    type Error = GpioError;

    fn pin_to_interrupt(pin: PinNumber) -> Option<InterruptLine> {
        (pin < PIN_COUNT).then_some(pin)
    }

    fn attach(line: InterruptLine, isr: Isr, mode: TriggerMode) -> Result<(), GpioError> {
        let mut gpio = unsafe { Bcm2835Gpio::new() };
        gpio::make_input(line)?;
        route_gpio_irq();
        disable_detection(&mut gpio, line)?;

        // The callback must be in place before detection can latch anything
        *TRAMPOLINES
            .lock()
            .get_mut(line as usize)
            .ok_or(GpioError::InvalidPin)? = Some(isr);

        gpio.set_sense(line, mode.sense())?;

        log::debug!("GPIO{} attached ({:?})", line, mode);
        Ok(())
    }

    fn detach(line: InterruptLine) -> Result<(), GpioError> {
        let mut gpio = unsafe { Bcm2835Gpio::new() };
        disable_detection(&mut gpio, line)?;

        if let Some(slot) = TRAMPOLINES.lock().get_mut(line as usize) {
            *slot = None;
        }

        log::debug!("GPIO{} detached", line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gpio_pin_is_an_interrupt_line() {
        assert_eq!(Bcm2835Platform::pin_to_interrupt(0), Some(0));
        assert_eq!(Bcm2835Platform::pin_to_interrupt(53), Some(53));
        assert_eq!(Bcm2835Platform::pin_to_interrupt(54), None);
    }

    #[test]
    fn attach_rejects_unknown_pins_without_touching_hardware() {
        fn never() {}
        assert_eq!(
            Bcm2835Platform::attach(200, never, TriggerMode::RisingEdge),
            Err(GpioError::InvalidPin)
        );
    }
}
