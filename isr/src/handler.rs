//! Handler objects and their begin/end life-cycle.

use core::marker::PhantomPinned;
use core::pin::Pin;
use core::ptr::NonNull;

use drivers::hal::interrupt::PinNumber;
use drivers::platform::{CurrentPlatform, Platform};

use crate::binding::InterruptLines;
use crate::error::BindError;
use crate::registry::Notify;

/// Receives the interrupts of a binding list.
///
/// Every declared pin lands in the same method; `pin` says which one fired.
pub trait InterruptHandler: Sync {
    /// Called in interrupt context.
    ///
    /// Must not block, and must not call `begin`/`end` on a handler of the
    /// same binding list (the list's slot is locked while this runs).
    /// `is_active()` and `is_bound()` do not take that lock and may be
    /// called here.
    fn fired(&self, pin: PinNumber);
}

/// A handler object bound to a binding list.
///
/// While active, the list's trampolines reach this object through a raw
/// pointer, so it must not move: [`begin`](Self::begin) takes `Pin<&Self>`.
/// Dropping an active handler ends it first.
///
/// States are Idle and Active. Idle → Active on a successful `begin`,
/// Active → Idle on a successful `end` or on drop. Failed calls change
/// nothing.
///
/// ```
/// use core::pin::pin;
/// use core::sync::atomic::{AtomicU8, Ordering};
/// use drivers::platform::sim::SimPlatform;
/// use isr::{InterruptHandler, IsrHandler, PinNumber, TriggerMode, interrupt_lines};
///
/// interrupt_lines! {
///     static BUTTONS: InterruptLines<SimPlatform> = [
///         (2, TriggerMode::RisingEdge),
///         (3, TriggerMode::FallingEdge),
///     ];
/// }
///
/// #[derive(Default)]
/// struct LastPressed(AtomicU8);
///
/// impl InterruptHandler for LastPressed {
///     fn fired(&self, pin: PinNumber) {
///         self.0.store(pin, Ordering::Relaxed);
///     }
/// }
///
/// let buttons = pin!(IsrHandler::new(&BUTTONS, LastPressed::default()));
/// let buttons = buttons.into_ref();
/// assert!(buttons.begin());
///
/// SimPlatform::fire(3);
/// assert_eq!(buttons.handler().0.load(Ordering::Relaxed), 3);
///
/// assert!(buttons.end());
/// assert!(!buttons.end());
/// ```
pub struct IsrHandler<H, P = CurrentPlatform>
where
    H: InterruptHandler + 'static,
    P: Platform + 'static,
{
    lines: &'static InterruptLines<P>,
    handler: H,
    _pinned: PhantomPinned,
}

impl<H, P> IsrHandler<H, P>
where
    H: InterruptHandler + 'static,
    P: Platform + 'static,
{
    pub const fn new(lines: &'static InterruptLines<P>, handler: H) -> Self {
        Self {
            lines,
            handler,
            _pinned: PhantomPinned,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn lines(&self) -> &'static InterruptLines<P> {
        self.lines
    }

    /// Whether this object currently receives the list's interrupts.
    pub fn is_active(&self) -> bool {
        self.lines.slot().holds(self.addr())
    }

    /// Start receiving interrupts.
    ///
    /// Returns `false` if a handler of the same list is already active (this
    /// one included), or if the platform refused a line; the latter is
    /// logged. Use [`try_begin`](Self::try_begin) to see platform errors.
    pub fn begin(self: Pin<&Self>) -> bool {
        match self.try_begin() {
            Ok(started) => started,
            Err(err) => {
                log::error!("begin failed: {}", err);
                false
            }
        }
    }

    /// Start receiving interrupts, reporting platform errors.
    ///
    /// `Ok(false)` means another handler already owns the list. On `Err`
    /// nothing stays installed: lines attached so far are detached again
    /// and the handler is Idle.
    pub fn try_begin(self: Pin<&Self>) -> Result<bool, BindError<P::Error>> {
        let this = self.get_ref();
        this.lines.check()?;

        let receiver: &(dyn Notify + 'static) = this;
        // SAFETY: `this` is pinned, so it is neither moved nor freed before
        // `Drop` runs, and `Drop` releases the slot
        if !unsafe { this.lines.slot().claim(NonNull::from(receiver)) } {
            log::debug!("handler already active, begin ignored");
            return Ok(false);
        }

        // The slot is claimed first so a line firing as soon as it is
        // attached already finds us
        if let Err((attached, err)) = this.lines.attach() {
            this.lines.slot().release(this.addr());
            if let Err(undo) = this.lines.detach(attached) {
                log::error!("undoing a failed begin: {}", undo);
            }
            return Err(err);
        }

        log::debug!(
            "handler active on {} line(s) of {}",
            this.lines.bindings().len(),
            P::name()
        );
        Ok(true)
    }

    /// Stop receiving interrupts.
    ///
    /// Returns `false` if this object is not the active handler, including
    /// when it already ended. A detach failure is logged; the handler is
    /// Idle regardless and `true` is returned.
    pub fn end(&self) -> bool {
        match self.try_end() {
            Ok(ended) => ended,
            Err(err) => {
                log::error!("end: {}", err);
                true
            }
        }
    }

    /// Stop receiving interrupts, reporting platform errors.
    ///
    /// An `Err` still means the handler was active and now is Idle: the slot
    /// is cleared before any line is detached, and every line is attempted.
    pub fn try_end(&self) -> Result<bool, BindError<P::Error>> {
        if !self.lines.slot().release(self.addr()) {
            return Ok(false);
        }

        // Released first: an interrupt racing the detach sees an empty slot
        self.lines.detach(self.lines.bindings().len())?;

        log::debug!("handler ended");
        Ok(true)
    }

    fn addr(&self) -> *const () {
        self as *const Self as *const ()
    }
}

impl<H, P> Notify for IsrHandler<H, P>
where
    H: InterruptHandler + 'static,
    P: Platform + 'static,
{
    fn notify(&self, pin: PinNumber) {
        self.handler.fired(pin);
    }
}

impl<H, P> Drop for IsrHandler<H, P>
where
    H: InterruptHandler + 'static,
    P: Platform + 'static,
{
    fn drop(&mut self) {
        self.end();
    }
}
