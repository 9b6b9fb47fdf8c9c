//! Register Window Constants.
//!
//! This module defines the fixed layout of the controller's register window. It includes:
//! 1. **Register Slots:** Offsets of the enable and status registers within a pin's block.
//! 2. **Pin Decoding:** The offset field that selects the input pin.
//! 3. **Capacity Limits:** Hard maxima every configuration record must respect.
//!
//! Offsets here are relative to the register window, which the device maps at
//! `reg_offset` inside its container region.

/// Width of one register in bytes.
pub const REG_SIZE: u64 = 4;

/// Number of bits to shift to convert between byte offsets and register indices.
pub const REG_SHIFT: u64 = 2;

/// Distance in bytes between two consecutive pin register blocks.
pub const PIN_STRIDE: u64 = 0x100;

/// Mask selecting the pin index field of a register window offset.
pub const PIN_FIELD_MASK: u64 = 0x0f00;

/// Shift of the pin index field within a register window offset.
pub const PIN_FIELD_SHIFT: u64 = 8;

/// Mask selecting the register slot within a pin's block.
pub const SLOT_MASK: u64 = PIN_STRIDE - 1;

/// Slot of the enable (and ISR mask toggle) register within a pin's block.
pub const ENABLE_SLOT: u64 = 0x000;

/// Slot of the status (acknowledge) register within a pin's block.
pub const STATUS_SLOT: u64 = 0x004;

/// Status write value that reinitializes the register instead of acknowledging work.
pub const STATUS_REINIT: u32 = 0xFFFF_FFFF;

/// Hard maximum of input pins, bounded by the 4-bit pin index field.
pub const MAX_INPUT_PINS: usize = ((PIN_FIELD_MASK >> PIN_FIELD_SHIFT) + 1) as usize;

/// Hard maximum of source lines per pin, bounded by the 32-bit register width.
pub const MAX_LINES_PER_PIN: usize = 32;

/// Returns the register window offset of a pin's enable register.
#[inline]
pub const fn enable_offset(pin: usize) -> u64 {
    PIN_STRIDE * pin as u64 + ENABLE_SLOT
}

/// Returns the register window offset of a pin's status register.
#[inline]
pub const fn status_offset(pin: usize) -> u64 {
    PIN_STRIDE * pin as u64 + STATUS_SLOT
}
