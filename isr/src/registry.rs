//! The slot naming the handler that currently owns a binding list.

use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicPtr, Ordering};

use common::sync::{IrqSpinLock, irq::IrqControl};
use drivers::hal::interrupt::PinNumber;

/// Type-erased receiver of forwarded interrupts.
pub(crate) trait Notify: Sync {
    fn notify(&self, pin: PinNumber);
}

#[derive(Clone, Copy)]
struct Active(NonNull<dyn Notify>);

// SAFETY: the pointee is `Sync` and is only ever borrowed shared
unsafe impl Send for Active {}

impl Active {
    fn addr(self) -> *const () {
        self.0.as_ptr() as *const ()
    }
}

/// Process-wide slot holding at most one active handler.
///
/// One slot exists per binding list; [`interrupt_lines!`](crate::interrupt_lines)
/// declares it next to the trampolines that read it. It starts out empty.
///
/// Claims, releases and the read done by [`dispatch`](Self::dispatch) in
/// interrupt context all happen under an [`IrqSpinLock`], so a trampoline
/// sees either the old handler or the new one and never a half-written
/// pointer. Queries only read `current`, which is updated inside the same
/// critical sections, so they never wait on the lock and are safe to call
/// from a running handler.
pub struct HandlerSlot<I: IrqControl> {
    active: IrqSpinLock<Option<Active>, I>,
    /// Address of the installed handler, null when empty.
    current: AtomicPtr<()>,
}

impl<I: IrqControl> HandlerSlot<I> {
    pub const fn new() -> Self {
        Self {
            active: IrqSpinLock::new(None),
            current: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Install `handler` unless another handler is already installed.
    ///
    /// The emptiness check and the store are one critical section.
    ///
    /// # Safety
    ///
    /// `handler` must stay valid until it is removed with [`release`](Self::release).
    pub(crate) unsafe fn claim(&self, handler: NonNull<dyn Notify>) -> bool {
        let mut active = self.active.lock();
        if active.is_some() {
            return false;
        }
        *active = Some(Active(handler));
        self.current
            .store(handler.as_ptr() as *mut (), Ordering::Release);
        true
    }

    /// Empty the slot if and only if it holds the handler at `handler`.
    pub(crate) fn release(&self, handler: *const ()) -> bool {
        let mut active = self.active.lock();
        if active.is_some_and(|current| current.addr() == handler) {
            *active = None;
            self.current.store(ptr::null_mut(), Ordering::Release);
            true
        } else {
            false
        }
    }

    pub(crate) fn holds(&self, handler: *const ()) -> bool {
        ptr::eq(self.current.load(Ordering::Acquire), handler)
    }

    /// Whether some handler is installed.
    pub fn is_occupied(&self) -> bool {
        !self.current.load(Ordering::Acquire).is_null()
    }

    /// Forward a fired `pin` to the installed handler, or do nothing if the
    /// slot is empty.
    ///
    /// This is what trampolines call from interrupt context. The slot stays
    /// locked while the handler runs, which is what lets `end()` promise that
    /// no callback is in flight once it returns. A handler must therefore not
    /// start or end registrations of its own binding list; querying it is
    /// fine.
    pub fn dispatch(&self, pin: PinNumber) {
        let active = self.active.lock();
        if let Some(Active(handler)) = *active {
            // SAFETY: a claimed handler stays valid until released, and
            // releasing needs the lock we hold
            unsafe { handler.as_ref() }.notify(pin);
        }
    }
}

impl<I: IrqControl> Default for HandlerSlot<I> {
    fn default() -> Self {
        Self::new()
    }
}
