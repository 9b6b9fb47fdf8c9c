//! Common types and constants used throughout the interrupt controller model.
//!
//! This module provides the building blocks shared by every part of the device. It includes:
//! 1. **Constants:** Register window layout and capacity limits.
//! 2. **Error Handling:** The error type returned by fallible controller operations.
//! 3. **Register Storage:** The raw guest-visible register file.

/// Register window layout and capacity constants.
pub mod constants;

/// Error type for controller operations.
pub mod error;

/// Raw register file implementation.
pub mod reg;

pub use constants::{MAX_INPUT_PINS, MAX_LINES_PER_PIN};
pub use error::IntcError;
pub use reg::RegisterFile;
