//! Architecture backends for interrupt masking.
//!
//! [`CurrentIrq`] names the backend for the target being built, so code that
//! only needs "the" critical section does not have to spell out a `cfg`.

#[cfg(target_arch = "arm")]
pub mod arm;
pub mod host;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "arm")] {
        pub use arm::irq::ArmIrq as CurrentIrq;
    } else {
        pub use host::HostIrq as CurrentIrq;
    }
}
