//! Configuration system for the interrupt controller model.
//!
//! This module defines the configuration records used to size a controller instance. It provides:
//! 1. **Defaults:** Capacity constants of the AST2700 INTC, the reference silicon variant.
//! 2. **Records:** `IntcConfig`, the per-variant topology record, and `Config`, the root record.
//! 3. **Variants:** `IntcVariant`, the set of named chip variants.
//!
//! A chip variant is data, not behavior: adding one means adding an `IntcVariant` arm and its
//! record. Configuration is supplied as JSON by the surrounding machine model, or use
//! `Config::default()` for the reference variant.

use serde::Deserialize;

use crate::common::constants::{MAX_INPUT_PINS, MAX_LINES_PER_PIN, REG_SHIFT, status_offset};
use crate::common::error::IntcError;

/// Default configuration constants (AST2700 INTC).
mod defaults {
    /// Physical base address of the INTC container region on the AST2700.
    pub const BASE_ADDR: u64 = 0x1210_0000;

    /// Source lines OR-ed into each input pin.
    pub const NUM_LINES: usize = 32;

    /// Input pins (GICINT128 to GICINT136).
    pub const NUM_INPINS: usize = 9;

    /// Output pins; one per input pin.
    pub const NUM_OUTPINS: usize = 9;

    /// Size of the container region in bytes.
    pub const MEM_SIZE: u64 = 0x4000;

    /// Number of 32-bit registers (0x808 bytes of register file).
    pub const NR_REGS: usize = 0x808 >> 2;

    /// Offset of the register window inside the container region.
    ///
    /// Register offsets in the datasheet are 0x1000 higher than the window offsets
    /// used by the controller, since the window starts here.
    pub const REG_OFFSET: u64 = 0x1000;
}

/// Named interrupt controller variants.
///
/// Each variant selects one immutable `IntcConfig` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum IntcVariant {
    /// ASPEED AST2700 INTC: nine 32-line pins (GICINT128 to GICINT136).
    #[default]
    #[serde(alias = "AST2700")]
    Ast2700,
}

impl IntcVariant {
    /// Returns the configuration record for this variant.
    pub const fn config(self) -> IntcConfig {
        match self {
            Self::Ast2700 => IntcConfig {
                num_lines: defaults::NUM_LINES,
                num_inpins: defaults::NUM_INPINS,
                num_outpins: defaults::NUM_OUTPINS,
                mem_size: defaults::MEM_SIZE,
                nr_regs: defaults::NR_REGS,
                reg_offset: defaults::REG_OFFSET,
            },
        }
    }

    /// Returns the device type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ast2700 => "aspeed.intc-ast2700",
        }
    }

    /// Returns the human-readable device description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ast2700 => "ASPEED 2700 INTC Controller",
        }
    }

    /// Returns the variant whose record equals `config`, if any.
    pub fn matching(config: &IntcConfig) -> Option<Self> {
        [Self::Ast2700]
            .into_iter()
            .find(|variant| variant.config() == *config)
    }
}

/// Topology and register layout of one controller variant.
///
/// Every per-pin array and the register file are sized from this record at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IntcConfig {
    /// Source lines per input pin (W).
    #[serde(default = "IntcConfig::default_num_lines")]
    pub num_lines: usize,

    /// Input pins (N_in).
    #[serde(default = "IntcConfig::default_num_inpins")]
    pub num_inpins: usize,

    /// Output pins (N_out).
    #[serde(default = "IntcConfig::default_num_outpins")]
    pub num_outpins: usize,

    /// Size of the container region in bytes.
    #[serde(default = "IntcConfig::default_mem_size")]
    pub mem_size: u64,

    /// Number of 32-bit registers in the register file.
    #[serde(default = "IntcConfig::default_nr_regs")]
    pub nr_regs: usize,

    /// Offset of the register window inside the container region.
    #[serde(default = "IntcConfig::default_reg_offset")]
    pub reg_offset: u64,
}

impl IntcConfig {
    fn default_num_lines() -> usize {
        defaults::NUM_LINES
    }

    fn default_num_inpins() -> usize {
        defaults::NUM_INPINS
    }

    fn default_num_outpins() -> usize {
        defaults::NUM_OUTPINS
    }

    fn default_mem_size() -> u64 {
        defaults::MEM_SIZE
    }

    fn default_nr_regs() -> usize {
        defaults::NR_REGS
    }

    fn default_reg_offset() -> u64 {
        defaults::REG_OFFSET
    }

    /// Returns the extent of the register window in bytes.
    pub const fn window_size(&self) -> u64 {
        (self.nr_regs as u64) << REG_SHIFT
    }

    /// Checks that the record describes a buildable controller.
    ///
    /// # Returns
    ///
    /// `Err(IntcError::InvalidConfig)` naming the first violated constraint.
    pub fn validate(&self) -> Result<(), IntcError> {
        if self.num_lines == 0 || self.num_lines > MAX_LINES_PER_PIN {
            return Err(IntcError::InvalidConfig(format!(
                "num_lines must be in 1..={MAX_LINES_PER_PIN}, got {}",
                self.num_lines
            )));
        }
        if self.num_inpins == 0 || self.num_inpins > MAX_INPUT_PINS {
            return Err(IntcError::InvalidConfig(format!(
                "num_inpins must be in 1..={MAX_INPUT_PINS}, got {}",
                self.num_inpins
            )));
        }
        if self.num_outpins == 0 {
            return Err(IntcError::InvalidConfig(
                "num_outpins must be nonzero".to_string(),
            ));
        }
        let last_pin = self.num_inpins - 1;
        if status_offset(last_pin) >= self.window_size() {
            return Err(IntcError::InvalidConfig(format!(
                "register file of {:#x} bytes does not cover status register of pin {last_pin} at {:#x}",
                self.window_size(),
                status_offset(last_pin)
            )));
        }
        if self.reg_offset.saturating_add(self.window_size()) > self.mem_size {
            return Err(IntcError::InvalidConfig(format!(
                "register window {:#x}+{:#x} exceeds container size {:#x}",
                self.reg_offset,
                self.window_size(),
                self.mem_size
            )));
        }
        Ok(())
    }
}

impl Default for IntcConfig {
    fn default() -> Self {
        IntcVariant::default().config()
    }
}

/// Root configuration for one controller instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Physical base address of the container region.
    #[serde(default = "Config::default_base_addr")]
    pub base_addr: u64,

    /// Named variant supplying the topology.
    #[serde(default)]
    pub variant: IntcVariant,

    /// Explicit topology record; overrides `variant` when present.
    #[serde(default)]
    pub intc: Option<IntcConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_addr: defaults::BASE_ADDR,
            variant: IntcVariant::default(),
            intc: None,
        }
    }
}

impl Config {
    fn default_base_addr() -> u64 {
        defaults::BASE_ADDR
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// `IntcError::InvalidConfig` if the text is not a valid configuration document.
    pub fn from_json(json: &str) -> Result<Self, IntcError> {
        serde_json::from_str(json).map_err(|e| IntcError::InvalidConfig(e.to_string()))
    }

    /// Returns the topology record in effect: the explicit record, or the variant's.
    pub fn intc_config(&self) -> IntcConfig {
        self.intc.unwrap_or_else(|| self.variant.config())
    }
}
