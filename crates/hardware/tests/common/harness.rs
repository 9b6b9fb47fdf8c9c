//! Test harness for controller tests.

use std::sync::Once;

use intc_core::Intc;
use intc_core::common::RegisterFile;
use intc_core::config::{IntcConfig, IntcVariant};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer tracing subscriber once per test binary.
///
/// Set `RUST_LOG=trace` to see controller events in failing tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Container base address used by device-level tests.
pub const TEST_BASE: u64 = 0x1210_0000;

/// Builds the AST2700 controller.
pub fn ast2700() -> Intc {
    init_tracing();
    Intc::with_variant(TEST_BASE, IntcVariant::Ast2700).unwrap()
}

/// Builds a controller with 32 lines per pin and `pins` input/output pins.
pub fn with_pins(pins: usize) -> Intc {
    init_tracing();
    let config = IntcConfig {
        num_inpins: pins,
        num_outpins: pins,
        ..IntcConfig::default()
    };
    Intc::new(TEST_BASE, config).unwrap()
}

/// Register window offset of a pin's enable register.
pub const fn en(pin: u64) -> u64 {
    0x100 * pin
}

/// Register window offset of a pin's status register.
pub const fn st(pin: u64) -> u64 {
    0x100 * pin + 0x4
}

/// Complete observable state of a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Register file contents.
    pub regs: RegisterFile,
    /// (enable, mask, pending) per pin.
    pub pins: Vec<(u32, u32, u32)>,
    /// Source line levels per pin.
    pub lines: Vec<u32>,
    /// Output line levels.
    pub outputs: Vec<bool>,
}

/// Captures every piece of observable controller state.
pub fn snapshot(intc: &Intc) -> Snapshot {
    let pins = intc.config().num_inpins;
    Snapshot {
        regs: intc.registers().clone(),
        pins: (0..pins)
            .map(|p| {
                (
                    intc.enable(p).unwrap(),
                    intc.mask(p).unwrap(),
                    intc.pending(p).unwrap(),
                )
            })
            .collect(),
        lines: (0..pins).map(|p| intc.line_levels(p).unwrap()).collect(),
        outputs: intc.output_levels().to_vec(),
    }
}
