//! ASPEED interrupt aggregation controller model.
//!
//! This crate implements a register-accurate model of the INTC block found in ASPEED SoCs,
//! which multiplexes many source interrupt lines into a few downstream pins:
//! 1. **Aggregation:** Per-pin OR gates over up to 32 source lines.
//! 2. **State machine:** Enable, ISR mask, pending replay, and write-1-to-clear status.
//! 3. **Registers:** A guest-visible 32-bit register window with bit-exact side effects.
//! 4. **Configuration:** Data-driven chip variants and JSON loading.
//! 5. **Integration:** An MMIO `Device` surface and a thread-safe shared handle.

/// Common types and constants (register layout, errors, register file).
pub mod common;
/// Controller configuration (variants, topology records, JSON loading).
pub mod config;
/// System-on-chip (interrupt controller device, MMIO trait, shared handle).
pub mod soc;

/// Error type returned by fallible controller operations.
pub use crate::common::IntcError;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The interrupt controller; construct with `Intc::new` or `Intc::with_variant`.
pub use crate::soc::Intc;
