//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! These traits are implemented by the platform drivers so that interrupt
//! users never name a SoC.
//!
//! # Available Interfaces
//!
//! - [`gpio`]: pin levels and event detection
//! - [`interrupt`]: interrupt controller and external interrupt routing

pub mod gpio;
pub mod interrupt;
