//! System-on-Chip (SoC) Components.
//!
//! This module organizes the interrupt controller device, the MMIO trait the surrounding
//! bus framework drives it through, and the shared handle used when register accesses and
//! source line changes come from different threads.

/// Memory-mapped I/O device implementations.
pub mod devices;

/// Shared controller handle and source line handles.
pub mod handle;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use devices::Intc;
pub use handle::{IntcHandle, IrqLine};
