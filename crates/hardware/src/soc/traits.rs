//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait the surrounding bus framework uses to reach a
//! memory-mapped device. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte, half, word, and doubleword read/write at device-relative offsets.
//! 3. **Lifecycle:** `reset` for controller resets scheduled by the machine.
//!
//! Accesses through this trait cannot fail: devices report guest errors to the log and drop
//! the access, the way real bus fabric does. All implementors must be `Send + Sync`.

/// Trait for memory-mapped I/O devices attached to the system bus.
///
/// Offsets are relative to the base address returned by `address_range`.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"aspeed.intc-ast2700"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's MMIO region.
    fn address_range(&self) -> (u64, u64);
    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u64) -> u8;
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Reads eight bytes (little-endian) at the given offset.
    fn read_u64(&mut self, offset: u64) -> u64;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u64, val: u8);
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u64, val: u16);
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32);
    /// Writes eight bytes (little-endian) at the given offset.
    fn write_u64(&mut self, offset: u64, val: u64);

    /// Returns the device to its power-on state (default: no state to reset).
    fn reset(&mut self) {}
}
