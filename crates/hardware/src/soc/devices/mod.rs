//! Memory-Mapped IO Devices.
//!
//! This module contains the interrupt aggregation controller found in ASPEED SoCs.

/// ASPEED interrupt aggregation controller (INTC).
pub mod intc;

pub use intc::{Intc, IrqSink};

pub use crate::soc::traits::Device;
