//! Interrupt controller error definitions.
//!
//! This module defines the error type reported by every fallible controller operation. It covers:
//! 1. **Topology errors:** Input pin, source line, or output pin indices outside the configured topology.
//! 2. **Guest programming errors:** Invalid status acknowledges and malformed register accesses.
//! 3. **Configuration errors:** Device configuration records that cannot describe real hardware.
//!
//! None of these are fatal: the controller drops the offending operation and stays usable.

use thiserror::Error;

/// Errors reported by the interrupt controller.
///
/// An operation that returns an error has not changed any controller state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntcError {
    /// Input pin index is not below the configured number of input pins.
    #[error("invalid input pin index: {pin} (input pins: {count})")]
    InvalidInputPin {
        /// Offending pin index.
        pin: usize,
        /// Configured number of input pins.
        count: usize,
    },

    /// Source line index is not below the configured number of lines per pin.
    #[error("invalid source line index: {line} (lines per pin: {count})")]
    InvalidLine {
        /// Offending line index.
        line: usize,
        /// Configured number of lines per pin.
        count: usize,
    },

    /// Output pin index is not below the configured number of output pins.
    #[error("invalid output pin index: {pin} (output pins: {count})")]
    InvalidOutputPin {
        /// Offending output pin index.
        pin: usize,
        /// Configured number of output pins.
        count: usize,
    },

    /// A status register was written with zero, which acknowledges nothing.
    #[error("invalid data 0 written to status register at {offset:#x}")]
    InvalidStatusWrite {
        /// Register window offset of the status register.
        offset: u64,
    },

    /// The access falls outside the register window.
    #[error("offset {offset:#x} is outside the register window (size {size:#x})")]
    OffsetOutOfRange {
        /// Offending offset.
        offset: u64,
        /// Size of the region in bytes.
        size: u64,
    },

    /// The access is not aligned to a 32-bit register boundary.
    #[error("unaligned register access at {offset:#x}")]
    UnalignedAccess {
        /// Offending offset.
        offset: u64,
    },

    /// The access width is not the 4 bytes the register window accepts.
    #[error("invalid {size}-byte access at {offset:#x}")]
    InvalidAccessSize {
        /// Offending offset.
        offset: u64,
        /// Access width in bytes.
        size: usize,
    },

    /// The device configuration record is inconsistent.
    #[error("invalid controller configuration: {0}")]
    InvalidConfig(String),
}
