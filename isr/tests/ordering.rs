//! Order of slot updates, line registration and interrupt masking, observed
//! through a recording platform.
//!
//! The recording platform fires a line's callback as soon as it is attached,
//! and once more just before it is detached, the way a noisy pin would.

use core::pin::pin;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use common::sync::irq::IrqControl;
use drivers::ExternalInterrupts;
use drivers::hal::interrupt::{InterruptLine, Isr};
use isr::{BindError, InterruptHandler, IsrHandler, PinNumber, Platform, TriggerMode, interrupt_lines};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Event {
    Mask,
    Unmask,
    Attach(InterruptLine, TriggerMode),
    Detach(InterruptLine),
    Fired(PinNumber),
}

use Event::*;

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
    static ISRS: RefCell<HashMap<InterruptLine, Isr>> = RefCell::new(HashMap::new());
    static FAIL_ATTACH: Cell<Option<InterruptLine>> = const { Cell::new(None) };
    static FAIL_DETACH: Cell<Option<InterruptLine>> = const { Cell::new(None) };
}

fn record(event: Event) {
    EVENTS.with(|e| e.borrow_mut().push(event));
}

fn take_events() -> Vec<Event> {
    EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
}

fn isr_for(line: InterruptLine) -> Option<Isr> {
    ISRS.with(|isrs| isrs.borrow().get(&line).copied())
}

struct TracingIrq;

impl IrqControl for TracingIrq {
    type State = ();

    fn disable() {
        record(Mask);
    }

    fn restore(_: ()) {
        record(Unmask);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Refused(InterruptLine);

/// Lines are numbered 100 above their pin; pins 50 and up have none.
struct Recording;

impl ExternalInterrupts for Recording {
    type Error = Refused;

    fn pin_to_interrupt(pin: PinNumber) -> Option<InterruptLine> {
        (pin < 50).then(|| pin + 100)
    }

    fn attach(line: InterruptLine, isr: Isr, mode: TriggerMode) -> Result<(), Refused> {
        if FAIL_ATTACH.get() == Some(line) {
            return Err(Refused(line));
        }
        record(Attach(line, mode));
        ISRS.with(|isrs| isrs.borrow_mut().insert(line, isr));
        isr();
        Ok(())
    }

    fn detach(line: InterruptLine) -> Result<(), Refused> {
        record(Detach(line));
        if FAIL_DETACH.get() == Some(line) {
            return Err(Refused(line));
        }
        if let Some(isr) = isr_for(line) {
            isr();
        }
        ISRS.with(|isrs| isrs.borrow_mut().remove(&line));
        Ok(())
    }
}

impl Platform for Recording {
    type Irq = TracingIrq;

    fn name() -> &'static str {
        "recording"
    }

    unsafe fn init_interrupts() {}

    fn dispatch_pending() -> usize {
        0
    }
}

struct Tracer;

impl InterruptHandler for Tracer {
    fn fired(&self, pin: PinNumber) {
        record(Fired(pin));
    }
}

#[test]
fn slot_is_claimed_before_lines_and_released_before_them() {
    interrupt_lines! {
        static LINES: InterruptLines<Recording> = [
            (1, TriggerMode::RisingEdge),
            (2, TriggerMode::FallingEdge),
        ];
    }

    let handler = pin!(IsrHandler::new(&LINES, Tracer));
    let handler = handler.into_ref();

    assert!(handler.begin());
    assert_eq!(
        take_events(),
        [
            // claim
            Mask,
            Unmask,
            Attach(101, TriggerMode::RisingEdge),
            Mask,
            Fired(1),
            Unmask,
            Attach(102, TriggerMode::FallingEdge),
            Mask,
            Fired(2),
            Unmask,
        ]
    );

    assert!(handler.end());
    assert_eq!(
        take_events(),
        [
            // release
            Mask,
            Unmask,
            // the callbacks still run but find the slot empty
            Detach(101),
            Mask,
            Unmask,
            Detach(102),
            Mask,
            Unmask,
        ]
    );
}

#[test]
fn failed_attach_undoes_only_what_was_attached() {
    interrupt_lines! {
        static LINES: InterruptLines<Recording> = [
            (6, TriggerMode::LevelHigh),
            (7, TriggerMode::LevelHigh),
            (8, TriggerMode::LevelHigh),
        ];
    }

    let handler = pin!(IsrHandler::new(&LINES, Tracer));
    let handler = handler.into_ref();

    FAIL_ATTACH.set(Some(107));
    assert_eq!(
        handler.try_begin(),
        Err(BindError::Attach {
            pin: 7,
            error: Refused(107),
        })
    );
    assert_eq!(
        take_events(),
        [
            Mask,
            Unmask,
            Attach(106, TriggerMode::LevelHigh),
            Mask,
            Fired(6),
            Unmask,
            Mask,
            Unmask,
            Detach(106),
            Mask,
            Unmask,
        ]
    );
    assert!(!handler.is_active());
    FAIL_ATTACH.set(None);
}

#[test]
fn failed_detach_still_detaches_the_rest() {
    interrupt_lines! {
        static LINES: InterruptLines<Recording> = [
            (3, TriggerMode::BothEdges),
            (4, TriggerMode::BothEdges),
            (5, TriggerMode::BothEdges),
        ];
    }

    let handler = pin!(IsrHandler::new(&LINES, Tracer));
    let handler = handler.into_ref();
    assert!(handler.begin());
    take_events();

    FAIL_DETACH.set(Some(104));
    assert_eq!(
        handler.try_end(),
        Err(BindError::Detach {
            pin: 4,
            error: Refused(104),
        })
    );
    let detached: Vec<_> = take_events()
        .into_iter()
        .filter(|e| matches!(e, Detach(_) | Fired(_)))
        .collect();
    assert_eq!(detached, [Detach(103), Detach(104), Detach(105)]);

    assert!(!handler.is_active());
    assert!(!LINES.is_bound());
    assert_eq!(handler.try_end(), Ok(false));
    FAIL_DETACH.set(None);
}

#[test]
fn unroutable_pins_touch_nothing() {
    interrupt_lines! {
        static LINES: InterruptLines<Recording> = [
            (9, TriggerMode::RisingEdge),
            (60, TriggerMode::RisingEdge),
        ];
    }

    let handler = pin!(IsrHandler::new(&LINES, Tracer));
    let handler = handler.into_ref();

    assert_eq!(handler.try_begin(), Err(BindError::NotAnInterrupt(60)));
    assert!(take_events().is_empty());
    assert!(!handler.begin());
}

#[test]
fn rejected_second_handler_touches_no_line() {
    interrupt_lines! {
        static LINES: InterruptLines<Recording> = [(10, TriggerMode::LevelLow)];
    }

    let first = pin!(IsrHandler::new(&LINES, Tracer));
    let first = first.into_ref();
    let second = pin!(IsrHandler::new(&LINES, Tracer));
    let second = second.into_ref();

    assert!(first.begin());
    take_events();

    assert_eq!(second.try_begin(), Ok(false));
    assert_eq!(take_events(), [Mask, Unmask]);

    assert_eq!(second.try_end(), Ok(false));
    assert_eq!(take_events(), [Mask, Unmask]);
    assert!(first.is_active());
}
