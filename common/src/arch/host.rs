use crate::sync::irq::IrqControl;

/// Interrupt control for hosted builds.
///
/// A hosted process has no interrupt mask to flip, so `disable()` and
/// `restore()` do nothing. Exclusion between host threads still comes from
/// the spin flag of [`IrqSpinLock`](crate::sync::IrqSpinLock).
#[derive(Debug)]
pub struct HostIrq;

impl IrqControl for HostIrq {
    type State = ();

    #[inline(always)]
    fn disable() {}

    #[inline(always)]
    fn restore(_state: ()) {}
}
