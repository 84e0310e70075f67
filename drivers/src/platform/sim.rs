//! Host simulator platform.
//!
//! Models a board with [`PIN_COUNT`] interrupt-capable pins so interrupt
//! users can be exercised without hardware. Pins are driven with
//! [`SimPlatform::drive`], which evaluates the attached trigger mode and
//! runs the callback on a match, or forced with [`SimPlatform::fire`].
//!
//! State is process-wide, like the peripheral it stands in for. Tests that
//! run in parallel should keep to disjoint pins.

use core::sync::atomic::{AtomicU64, Ordering};

use super::Platform;
use crate::hal::gpio::PinLevel;
use crate::hal::interrupt::{ExternalInterrupts, InterruptLine, Isr, PinNumber, TriggerMode};
use common::arch::host::HostIrq;
use common::sync::SpinLock;

/// Number of simulated pins.
pub const PIN_COUNT: u8 = 64;

#[derive(Debug, Copy, Clone)]
struct SimLine {
    level: PinLevel,
    attached: Option<(Isr, TriggerMode)>,
    pending: bool,
}

impl SimLine {
    const IDLE: Self = Self {
        level: PinLevel::Low,
        attached: None,
        pending: false,
    };
}

static LINES: SpinLock<[SimLine; PIN_COUNT as usize]> =
    SpinLock::new([SimLine::IDLE; PIN_COUNT as usize]);

/// One bit per line; attach on a set line fails.
static REJECT_ATTACH: AtomicU64 = AtomicU64::new(0);

/// Simulator errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The line does not exist.
    NoSuchLine(InterruptLine),
    /// Attach was refused by [`SimPlatform::reject_attach`].
    AttachRejected(InterruptLine),
}

pub struct SimPlatform;

impl SimPlatform {
    /// Make every later `attach` of `line` fail (or succeed again).
    ///
    /// Lines past [`PIN_COUNT`] are ignored; attaching them fails anyway.
    pub fn reject_attach(line: InterruptLine, reject: bool) {
        if line >= PIN_COUNT {
            return;
        }
        let bit = 1u64 << line;
        if reject {
            REJECT_ATTACH.fetch_or(bit, Ordering::SeqCst);
        } else {
            REJECT_ATTACH.fetch_and(!bit, Ordering::SeqCst);
        }
    }

    /// Trigger mode `line` is attached with, if any.
    pub fn attached(line: InterruptLine) -> Option<TriggerMode> {
        LINES
            .lock()
            .get(line as usize)
            .and_then(|l| l.attached)
            .map(|(_, mode)| mode)
    }

    /// Level `line` was last driven to.
    pub fn level(line: InterruptLine) -> Option<PinLevel> {
        LINES.lock().get(line as usize).map(|l| l.level)
    }

    /// Latch an event on `line` as if its trigger condition had occurred.
    ///
    /// Events on lines with nothing attached are dropped, as a disabled
    /// detector would.
    pub fn raise(line: InterruptLine) {
        if let Some(l) = LINES.lock().get_mut(line as usize) {
            if l.attached.is_some() {
                l.pending = true;
            }
        }
    }

    /// Deliver an interrupt on `line` right away, bypassing the latch.
    ///
    /// Returns whether a callback ran.
    pub fn fire(line: InterruptLine) -> bool {
        let isr = LINES
            .lock()
            .get(line as usize)
            .and_then(|l| l.attached)
            .map(|(isr, _)| isr);
        Self::run(isr)
    }

    /// Set the input level of `line` and deliver the interrupt it causes,
    /// if any. Returns whether a callback ran.
    pub fn drive(line: InterruptLine, level: PinLevel) -> bool {
        let isr = {
            let mut lines = LINES.lock();
            let Some(l) = lines.get_mut(line as usize) else {
                return false;
            };
            let previous = core::mem::replace(&mut l.level, level);
            l.attached
                .filter(|&(_, mode)| mode.sense().matches(previous, level))
                .map(|(isr, _)| isr)
        };
        Self::run(isr)
    }

    /// Acknowledge the latched event of one line and run its callback.
    fn service(line: InterruptLine) -> bool {
        let isr = match LINES.lock().get_mut(line as usize) {
            Some(l) if l.pending => {
                l.pending = false;
                l.attached.map(|(isr, _)| isr)
            }
            _ => None,
        };
        Self::run(isr)
    }

    // Callbacks run with `LINES` released; they may attach or detach.
    fn run(isr: Option<Isr>) -> bool {
        match isr {
            Some(isr) => {
                isr();
                true
            }
            None => false,
        }
    }
}

impl Platform for SimPlatform {
    type Irq = HostIrq;

    fn name() -> &'static str {
        "Host simulator"
    }

    unsafe fn init_interrupts() {
        *LINES.lock() = [SimLine::IDLE; PIN_COUNT as usize];
        REJECT_ATTACH.store(0, Ordering::SeqCst);
    }

    fn dispatch_pending() -> usize {
        (0..PIN_COUNT).filter(|&line| Self::service(line)).count()
    }
}

impl ExternalInterrupts for SimPlatform {
    type Error = SimError;

    fn pin_to_interrupt(pin: PinNumber) -> Option<InterruptLine> {
        (pin < PIN_COUNT).then_some(pin)
    }

    fn attach(line: InterruptLine, isr: Isr, mode: TriggerMode) -> Result<(), SimError> {
        if line < PIN_COUNT && REJECT_ATTACH.load(Ordering::SeqCst) & (1 << line) != 0 {
            log::debug!("sim line {} refused attach", line);
            return Err(SimError::AttachRejected(line));
        }

        let mut lines = LINES.lock();
        let l = lines
            .get_mut(line as usize)
            .ok_or(SimError::NoSuchLine(line))?;
        l.attached = Some((isr, mode));
        l.pending = false;

        log::debug!("sim line {} attached ({:?})", line, mode);
        Ok(())
    }

    fn detach(line: InterruptLine) -> Result<(), SimError> {
        let mut lines = LINES.lock();
        let l = lines
            .get_mut(line as usize)
            .ok_or(SimError::NoSuchLine(line))?;
        l.attached = None;
        l.pending = false;

        log::debug!("sim line {} detached", line);
        Ok(())
    }
}
