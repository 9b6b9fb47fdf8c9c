//! Shared controller handle and source line handles.
//!
//! When source lines are raised from a different thread than the one issuing register
//! accesses (e.g. a device model thread and a vCPU thread), every operation must run as one
//! critical section. `IntcHandle` serializes all access through a single lock, and `IrqLine`
//! gives an interrupt source a handle to exactly one `(pin, line)` input.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::common::error::IntcError;
use crate::soc::devices::intc::Intc;
use crate::soc::traits::Device;

/// Cloneable, thread-safe handle to one controller instance.
#[derive(Clone, Debug)]
pub struct IntcHandle {
    inner: Arc<Mutex<Intc>>,
    name: &'static str,
    range: (u64, u64),
}

impl IntcHandle {
    /// Wraps a controller for shared use.
    pub fn new(intc: Intc) -> Self {
        let name = intc.type_name();
        let range = intc.address_range();
        Self {
            inner: Arc::new(Mutex::new(intc)),
            name,
            range,
        }
    }

    /// Locks the controller for a sequence of operations.
    ///
    /// A panic in another holder does not leave the controller half-updated (every
    /// operation validates before mutating), so a poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, Intc> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles a level change on a source line.
    ///
    /// # Errors
    ///
    /// See [`Intc::set_irq`].
    pub fn set_irq(&self, pin: usize, line: usize, level: bool) -> Result<(), IntcError> {
        self.lock().set_irq(pin, line, level)
    }

    /// Reads a register from the register window.
    ///
    /// # Errors
    ///
    /// See [`Intc::read`].
    pub fn read(&self, offset: u64) -> Result<u32, IntcError> {
        self.lock().read(offset)
    }

    /// Writes a register in the register window.
    ///
    /// # Errors
    ///
    /// See [`Intc::write`].
    pub fn write(&self, offset: u64, data: u32) -> Result<(), IntcError> {
        self.lock().write(offset, data)
    }

    /// Resets the controller.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Returns a handle to source line `line` of input pin `pin`.
    ///
    /// Indices are validated on every level change, not here.
    pub fn line(&self, pin: usize, line: usize) -> IrqLine {
        IrqLine {
            intc: self.clone(),
            pin,
            line,
        }
    }
}

impl Device for IntcHandle {
    fn name(&self) -> &str {
        self.name
    }

    fn address_range(&self) -> (u64, u64) {
        self.range
    }

    fn read_u8(&mut self, offset: u64) -> u8 {
        self.lock().read_u8(offset)
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        self.lock().read_u16(offset)
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        self.lock().read_u32(offset)
    }

    fn read_u64(&mut self, offset: u64) -> u64 {
        self.lock().read_u64(offset)
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        self.lock().write_u8(offset, val);
    }

    fn write_u16(&mut self, offset: u64, val: u16) {
        self.lock().write_u16(offset, val);
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.lock().write_u32(offset, val);
    }

    fn write_u64(&mut self, offset: u64, val: u64) {
        self.lock().write_u64(offset, val);
    }

    fn reset(&mut self) {
        IntcHandle::reset(self);
    }
}

/// Handle to one source interrupt line of a shared controller.
#[derive(Clone, Debug)]
pub struct IrqLine {
    intc: IntcHandle,
    pin: usize,
    line: usize,
}

impl IrqLine {
    /// Returns the input pin this line feeds.
    pub const fn pin(&self) -> usize {
        self.pin
    }

    /// Returns the line index within its pin.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Drives the line to `level`.
    ///
    /// # Errors
    ///
    /// See [`Intc::set_irq`].
    pub fn set_level(&self, level: bool) -> Result<(), IntcError> {
        self.intc.set_irq(self.pin, self.line, level)
    }

    /// Drives the line high.
    ///
    /// # Errors
    ///
    /// See [`Intc::set_irq`].
    pub fn raise(&self) -> Result<(), IntcError> {
        self.set_level(true)
    }

    /// Drives the line low.
    ///
    /// # Errors
    ///
    /// See [`Intc::set_irq`].
    pub fn lower(&self) -> Result<(), IntcError> {
        self.set_level(false)
    }
}
