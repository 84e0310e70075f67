use crate::sync::irq::IrqControl;

/// CPSR `I` bit. Set means IRQs are masked.
const CPSR_I_BIT: u32 = 1 << 7;

/// IRQ masking through the ARM CPSR.
///
/// `disable()` reports whether IRQs were unmasked before the call, and
/// `restore()` only unmasks again when they were. Nested critical sections
/// therefore leave IRQs masked until the outermost one ends.
///
/// FIQs are not touched.
#[derive(Debug)]
pub struct ArmIrq;

impl IrqControl for ArmIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        let cpsr: u32;
        unsafe {
            // Read the old mask and set it in one go
            core::arch::asm!(
                "mrs {0}, cpsr",
                "cpsid i",
                out(reg) cpsr,
                options(nomem, nostack)
            );
        }
        cpsr & CPSR_I_BIT == 0
    }

    #[inline(always)]
    fn restore(was_enabled: bool) {
        if was_enabled {
            unsafe {
                core::arch::asm!("cpsie i", options(nomem, nostack));
            }
        }
    }
}
