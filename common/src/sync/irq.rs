use core::fmt::Debug;

/// Interrupt masking on the current core.
///
/// This is the atomic-section primitive everything else builds on. A value
/// returned by [`disable`](IrqControl::disable) must be handed back to
/// [`restore`](IrqControl::restore) exactly once, innermost section first.
pub trait IrqControl {
    /// Mask state saved by `disable()`.
    type State: Copy + Debug;

    /// Mask interrupts and return the previous state.
    fn disable() -> Self::State;

    /// Put the mask back the way `disable()` found it.
    fn restore(state: Self::State);
}
