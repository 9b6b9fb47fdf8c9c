//! Output driver.
//!
//! Holds the level of every downstream output line and forwards level writes to an optional
//! sink (the downstream interrupt controller, or a test double). This is the only part of the
//! device with an externally observable effect besides register contents.

use std::fmt;

use crate::common::error::IntcError;

/// Receiver of output line level writes.
///
/// Every write is forwarded, including writes that repeat the current level.
pub trait IrqSink: Send + Sync {
    /// Sets the level of output line `outpin`.
    fn set_irq(&mut self, outpin: usize, level: bool);
}

/// Output line levels plus the optional downstream sink.
pub struct OutputPins {
    levels: Vec<bool>,
    num_inpins: usize,
    sink: Option<Box<dyn IrqSink>>,
}

impl OutputPins {
    /// Creates `num_outpins` output lines, all low, fed by `num_inpins` input pins.
    pub fn new(num_inpins: usize, num_outpins: usize) -> Self {
        Self {
            levels: vec![false; num_outpins],
            num_inpins,
            sink: None,
        }
    }

    /// Connects the downstream sink, returning the previously connected one.
    pub fn connect(&mut self, sink: Box<dyn IrqSink>) -> Option<Box<dyn IrqSink>> {
        self.sink.replace(sink)
    }

    /// Disconnects and returns the downstream sink.
    pub fn disconnect(&mut self) -> Option<Box<dyn IrqSink>> {
        self.sink.take()
    }

    /// Drives output line `outpin` on behalf of input pin `inpin`.
    ///
    /// # Errors
    ///
    /// `InvalidInputPin` or `InvalidOutputPin` if either index is outside the topology;
    /// the line is left unchanged.
    pub fn update(&mut self, inpin: usize, outpin: usize, level: bool) -> Result<(), IntcError> {
        if inpin >= self.num_inpins {
            return Err(IntcError::InvalidInputPin {
                pin: inpin,
                count: self.num_inpins,
            });
        }
        let Some(slot) = self.levels.get_mut(outpin) else {
            return Err(IntcError::InvalidOutputPin {
                pin: outpin,
                count: self.levels.len(),
            });
        };
        *slot = level;
        if let Some(sink) = self.sink.as_mut() {
            sink.set_irq(outpin, level);
        }
        Ok(())
    }

    /// Returns the level of output line `outpin`, or `None` if it does not exist.
    pub fn level(&self, outpin: usize) -> Option<bool> {
        self.levels.get(outpin).copied()
    }

    /// Returns every output line level.
    pub fn levels(&self) -> &[bool] {
        &self.levels
    }
}

impl fmt::Debug for OutputPins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputPins")
            .field("levels", &self.levels)
            .field("num_inpins", &self.num_inpins)
            .field("connected", &self.sink.is_some())
            .finish()
    }
}
