//! ASPEED Interrupt Controller (INTC).
//!
//! The INTC aggregates many source interrupt lines into a few downstream pins. Each input pin
//! ORs up to 32 source lines; firmware enables lines, masks them while their ISR runs, and
//! acknowledges them through a per-pin status register. Lines that fire while the pin is busy
//! are queued and replayed once the status register drains.
//!
//! # Memory Map
//!
//! The device occupies a container region of `mem_size` bytes; the register window is mapped
//! at `reg_offset` inside it. Within the window, pin `p` owns a 0x100-byte block:
//!
//! * `0x100*p + 0x000`: Enable register (enable new lines, or toggle ISR masking)
//! * `0x100*p + 0x004`: Status register (write 1 to acknowledge)
//!
//! All other registers are plain storage. Accesses must be 4 bytes wide and aligned.

/// OR-gate aggregation of source lines.
pub mod orgate;

/// Output line driver and downstream sink.
pub mod output;

/// Per-pin enable/mask/pending/status state machine.
pub mod pin;

use tracing::{trace, warn};

use crate::common::constants::{
    ENABLE_SLOT, PIN_FIELD_MASK, PIN_FIELD_SHIFT, REG_SIZE, SLOT_MASK, STATUS_SLOT,
    status_offset,
};
use crate::common::error::IntcError;
use crate::common::reg::RegisterFile;
use crate::config::{Config, IntcConfig, IntcVariant};
use crate::soc::traits::Device;

pub use orgate::OrGate;
pub use output::{IrqSink, OutputPins};
pub use pin::{EnableWrite, PinState, StatusWrite, Transition};

/// Type name of controllers built from a record that matches no named variant.
const GENERIC_NAME: &str = "aspeed.intc";

/// Description of controllers built from a record that matches no named variant.
const GENERIC_DESCRIPTION: &str = "ASPEED INTC Controller";

/// Register window slot addressed by an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Enable(usize),
    Status(usize),
    Raw,
}

/// INTC device structure.
#[derive(Debug)]
pub struct Intc {
    /// Device type name.
    name: &'static str,
    /// Human-readable description.
    description: &'static str,
    /// Base physical address of the container region.
    base_addr: u64,
    /// Topology record this instance was sized from.
    config: IntcConfig,
    /// Guest-visible registers; the status registers live here.
    regs: RegisterFile,
    /// One OR gate per input pin.
    orgates: Vec<OrGate>,
    /// One state record per input pin.
    pins: Vec<PinState>,
    /// Downstream output lines.
    outputs: OutputPins,
}

impl Intc {
    /// Creates a controller from a topology record.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Physical base address of the container region.
    /// * `config` - Topology record; validated before use.
    ///
    /// # Errors
    ///
    /// `IntcError::InvalidConfig` if the record fails validation.
    pub fn new(base_addr: u64, config: IntcConfig) -> Result<Self, IntcError> {
        config.validate()?;
        let (name, description) = IntcVariant::matching(&config).map_or(
            (GENERIC_NAME, GENERIC_DESCRIPTION),
            |variant| (variant.name(), variant.description()),
        );
        Ok(Self {
            name,
            description,
            base_addr,
            config,
            regs: RegisterFile::new(config.nr_regs),
            orgates: vec![OrGate::new(config.num_lines); config.num_inpins],
            pins: vec![PinState::default(); config.num_inpins],
            outputs: OutputPins::new(config.num_inpins, config.num_outpins),
        })
    }

    /// Creates a controller for a named variant.
    ///
    /// # Errors
    ///
    /// `IntcError::InvalidConfig` if the variant record fails validation.
    pub fn with_variant(base_addr: u64, variant: IntcVariant) -> Result<Self, IntcError> {
        Self::new(base_addr, variant.config())
    }

    /// Creates a controller from a root configuration.
    ///
    /// # Errors
    ///
    /// `IntcError::InvalidConfig` if the effective record fails validation.
    pub fn from_config(config: &Config) -> Result<Self, IntcError> {
        Self::new(config.base_addr, config.intc_config())
    }

    /// Returns the topology record.
    pub const fn config(&self) -> &IntcConfig {
        &self.config
    }

    /// Returns the device type name.
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Returns the human-readable description.
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Connects the downstream sink that receives output line writes.
    pub fn connect_output(&mut self, sink: Box<dyn IrqSink>) -> Option<Box<dyn IrqSink>> {
        self.outputs.connect(sink)
    }

    /// Disconnects the downstream sink.
    pub fn disconnect_output(&mut self) -> Option<Box<dyn IrqSink>> {
        self.outputs.disconnect()
    }

    /// Returns the level of output line `outpin`.
    pub fn output_level(&self, outpin: usize) -> Option<bool> {
        self.outputs.level(outpin)
    }

    /// Returns every output line level.
    pub fn output_levels(&self) -> &[bool] {
        self.outputs.levels()
    }

    /// Returns the enable bitmap of input pin `pin`.
    pub fn enable(&self, pin: usize) -> Option<u32> {
        self.pins.get(pin).map(|p| p.enable)
    }

    /// Returns the ISR mask bitmap of input pin `pin`.
    pub fn mask(&self, pin: usize) -> Option<u32> {
        self.pins.get(pin).map(|p| p.mask)
    }

    /// Returns the pending bitmap of input pin `pin`.
    pub fn pending(&self, pin: usize) -> Option<u32> {
        self.pins.get(pin).map(|p| p.pending)
    }

    /// Returns the status register of input pin `pin`.
    pub fn status(&self, pin: usize) -> Option<u32> {
        (pin < self.pins.len()).then(|| self.regs.read(status_offset(pin)))
    }

    /// Returns the source line levels of input pin `pin`.
    pub fn line_levels(&self, pin: usize) -> Option<u32> {
        self.orgates.get(pin).map(OrGate::levels)
    }

    /// Returns the raw register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Handles a level change on source line `line` of input pin `pin`.
    ///
    /// The line level is recorded in the pin's OR gate, and the gate output drives the pin.
    /// While any line is high, the enabled asserted lines are surfaced to firmware if the pin
    /// is idle, or queued as pending if the pin is masked or has unacknowledged status. Once
    /// every line is low nothing else changes: status and pending are only cleared by firmware.
    ///
    /// # Errors
    ///
    /// `InvalidInputPin` or `InvalidLine` for indices outside the topology; `InvalidOutputPin`
    /// if the pin would trigger but has no output line to drive. No state changes on error.
    pub fn set_irq(&mut self, pin: usize, line: usize, level: bool) -> Result<(), IntcError> {
        if pin >= self.pins.len() {
            return Err(IntcError::InvalidInputPin {
                pin,
                count: self.pins.len(),
            });
        }
        if line >= self.config.num_lines {
            return Err(IntcError::InvalidLine {
                line,
                count: self.config.num_lines,
            });
        }

        trace!(device = self.name, pin, line, level, "set_irq");

        // Work on copies; nothing is committed unless the output line can be driven.
        let mut gate = self.orgates[pin].clone();
        let mut state = self.pins[pin];
        let mut status = self.regs.read(status_offset(pin));
        gate.set_line(line, level);

        // The state machine sees the gate output: it only rests once every line is low.
        let transition = if gate.output() {
            let selected = gate.selected(state.enable);
            if selected != 0 {
                trace!(device = self.name, select = selected, "select");
            }
            state.on_active(selected, &mut status)
        } else {
            Transition::Unselected
        };

        if let Some(level) = transition.output_level() {
            self.update(pin, pin, level)?;
        }
        match transition {
            Transition::Unselected => {}
            Transition::Queued { pending, .. } => {
                trace!(device = self.name, pin, pending, "pending_irq");
            }
            Transition::Triggered { status } => {
                trace!(device = self.name, pin, outpin = pin, status, "trigger_irq");
            }
        }

        self.orgates[pin] = gate;
        self.pins[pin] = state;
        self.regs.write_raw(status_offset(pin), status);
        Ok(())
    }

    /// Reads a register from the register window.
    ///
    /// Reads have no side effects; every register returns its last stored raw value.
    ///
    /// # Errors
    ///
    /// `UnalignedAccess` or `OffsetOutOfRange` for offsets that do not name a register.
    pub fn read(&self, offset: u64) -> Result<u32, IntcError> {
        self.check_offset(offset)?;
        let value = self.regs.read(offset);
        trace!(device = self.name, offset, size = REG_SIZE, value, "read");
        Ok(value)
    }

    /// Writes a register in the register window.
    ///
    /// Enable and status registers of configured pins run their handlers; every other
    /// register stores the value as-is.
    ///
    /// # Errors
    ///
    /// `UnalignedAccess` or `OffsetOutOfRange` for offsets that do not name a register;
    /// `InvalidStatusWrite` for a zero status acknowledge; `InvalidOutputPin` if a status
    /// write would drive a missing output line. No state changes on error.
    pub fn write(&mut self, offset: u64, data: u32) -> Result<(), IntcError> {
        self.check_offset(offset)?;
        trace!(device = self.name, offset, size = REG_SIZE, data, "write");

        match self.decode(offset) {
            Slot::Enable(pin) => {
                self.enable_handler(pin, offset, data);
                Ok(())
            }
            Slot::Status(pin) => self.status_handler(pin, offset, data),
            Slot::Raw => {
                self.regs.write_raw(offset, data);
                Ok(())
            }
        }
    }

    /// Returns the controller to its power-on state.
    ///
    /// Zeroes the register file and every enable, mask, and pending bitmap. Source line
    /// levels and output line levels belong to the wiring and are left alone.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.pins.fill(PinState::default());
    }

    fn check_offset(&self, offset: u64) -> Result<(), IntcError> {
        if offset % REG_SIZE != 0 {
            return Err(IntcError::UnalignedAccess { offset });
        }
        let size = self.regs.size_bytes();
        if offset >= size {
            return Err(IntcError::OffsetOutOfRange { offset, size });
        }
        Ok(())
    }

    fn decode(&self, offset: u64) -> Slot {
        let pin = ((offset & PIN_FIELD_MASK) >> PIN_FIELD_SHIFT) as usize;
        // Offsets above the pin field alias nothing; they are plain storage.
        let in_pin_block = offset & !(PIN_FIELD_MASK | SLOT_MASK) == 0;
        if !in_pin_block || pin >= self.pins.len() {
            return Slot::Raw;
        }
        match offset & SLOT_MASK {
            ENABLE_SLOT => Slot::Enable(pin),
            STATUS_SLOT => Slot::Status(pin),
            _ => Slot::Raw,
        }
    }

    fn enable_handler(&mut self, pin: usize, offset: u64, data: u32) {
        let outcome = self.pins[pin].on_enable_write(self.regs.slot_mut(offset), data);
        match outcome {
            EnableWrite::Idle => {}
            EnableWrite::Enabled { enable } => {
                trace!(device = self.name, enable, "enable");
            }
            EnableWrite::Unmasked { change, mask } => {
                trace!(device = self.name, change, mask, "unmask");
            }
            EnableWrite::Masked { change, mask } => {
                trace!(device = self.name, change, mask, "mask");
            }
        }
    }

    fn status_handler(&mut self, pin: usize, offset: u64, data: u32) -> Result<(), IntcError> {
        if data == 0 {
            return Err(IntcError::InvalidStatusWrite { offset });
        }

        let mut state = self.pins[pin];
        let mut status = self.regs.read(offset);
        let outcome = state.on_status_write(&mut status, data);
        if let Some(level) = outcome.output_level() {
            self.update(pin, pin, level)?;
        }
        match outcome {
            StatusWrite::Reinitialized | StatusWrite::Outstanding { .. } => {}
            StatusWrite::Replayed { status } => {
                trace!(device = self.name, pin, "all_isr_done");
                trace!(device = self.name, pin, outpin = pin, status, "trigger_irq");
            }
            StatusWrite::Drained => {
                trace!(device = self.name, pin, "all_isr_done");
                trace!(device = self.name, pin, outpin = pin, level = 0, "clear_irq");
            }
        }

        self.pins[pin] = state;
        self.regs.write_raw(offset, status);
        Ok(())
    }

    fn update(&mut self, inpin: usize, outpin: usize, level: bool) -> Result<(), IntcError> {
        self.outputs.update(inpin, outpin, level)?;
        trace!(device = self.name, inpin, outpin, level, "update_irq");
        Ok(())
    }

    /// Maps a container offset onto the register window.
    fn window_offset(&self, offset: u64) -> Result<u64, IntcError> {
        let window = self.config.window_size();
        match offset.checked_sub(self.config.reg_offset) {
            Some(rel) if rel < window => Ok(rel),
            _ => Err(IntcError::OffsetOutOfRange {
                offset,
                size: self.config.mem_size,
            }),
        }
    }

    fn guest_error(&self, err: &IntcError) {
        warn!(target: "guest_error", device = self.name, "{err}");
    }

    fn bad_size(&self, offset: u64, size: usize) {
        self.guest_error(&IntcError::InvalidAccessSize { offset, size });
    }
}

impl Device for Intc {
    /// Returns the device type name.
    fn name(&self) -> &str {
        self.name
    }

    /// Returns the container address range (Base, Size).
    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.config.mem_size)
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn read_u8(&mut self, offset: u64) -> u8 {
        self.bad_size(offset, 1);
        0
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn read_u16(&mut self, offset: u64) -> u16 {
        self.bad_size(offset, 2);
        0
    }

    /// Reads a register at a container offset; unmapped or invalid offsets read 0.
    fn read_u32(&mut self, offset: u64) -> u32 {
        match self.window_offset(offset).and_then(|rel| self.read(rel)) {
            Ok(value) => value,
            Err(err) => {
                self.guest_error(&err);
                0
            }
        }
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn read_u64(&mut self, offset: u64) -> u64 {
        self.bad_size(offset, 8);
        0
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn write_u8(&mut self, offset: u64, _val: u8) {
        self.bad_size(offset, 1);
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn write_u16(&mut self, offset: u64, _val: u16) {
        self.bad_size(offset, 2);
    }

    /// Writes a register at a container offset; invalid writes are logged and dropped.
    fn write_u32(&mut self, offset: u64, val: u32) {
        if let Err(err) = self
            .window_offset(offset)
            .and_then(|rel| self.write(rel, val))
        {
            self.guest_error(&err);
        }
    }

    /// Rejected: the register window only accepts 4-byte accesses.
    fn write_u64(&mut self, offset: u64, _val: u64) {
        self.bad_size(offset, 8);
    }

    /// Resets the controller.
    fn reset(&mut self) {
        Intc::reset(self);
    }
}
