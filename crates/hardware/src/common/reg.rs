//! Raw Register File.
//!
//! This module provides the `RegisterFile` struct, the flat array of 32-bit guest-visible
//! registers behind the controller's register window. It provides:
//! 1. **Raw Storage:** Unconditional reads and writes addressed by byte offset.
//! 2. **Lifecycle:** Zeroing on controller reset.
//!
//! Registers without special semantics live here as plain memory. The pin dispatcher
//! validates offsets before delegating, so this type performs no range checks of its own.

use super::constants::REG_SHIFT;

/// Flat array of 32-bit registers addressed by byte offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: Vec<u32>,
}

impl RegisterFile {
    /// Creates a register file of `count` registers, all zero.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Returns the number of registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns `true` if the register file holds no registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Returns the extent of the register file in bytes.
    pub fn size_bytes(&self) -> u64 {
        (self.regs.len() as u64) << REG_SHIFT
    }

    /// Reads the raw value stored at the given byte offset.
    ///
    /// # Arguments
    ///
    /// * `offset` - Register window offset; must be in bounds.
    #[inline]
    pub fn read(&self, offset: u64) -> u32 {
        self.regs[(offset >> REG_SHIFT) as usize]
    }

    /// Stores `val` at the given byte offset unconditionally.
    ///
    /// # Arguments
    ///
    /// * `offset` - Register window offset; must be in bounds.
    /// * `val` - The 32-bit value to store.
    #[inline]
    pub fn write_raw(&mut self, offset: u64, val: u32) {
        self.regs[(offset >> REG_SHIFT) as usize] = val;
    }

    /// Returns a mutable reference to the register at the given byte offset.
    #[inline]
    pub(crate) fn slot_mut(&mut self, offset: u64) -> &mut u32 {
        &mut self.regs[(offset >> REG_SHIFT) as usize]
    }

    /// Zeroes every register.
    pub fn clear(&mut self) {
        self.regs.fill(0);
    }
}
