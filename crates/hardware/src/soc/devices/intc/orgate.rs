//! OR-gate aggregator for one input pin.
//!
//! Each input pin of the controller is fed by an OR gate over its source lines. The gate
//! remembers the last level of every line and, on demand, reports which asserted lines are
//! also enabled. It makes no decisions; the pin state machine does.

/// Last-known source line levels of one input pin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrGate {
    /// Line levels as a bitmap; bit `i` is line `i`.
    levels: u32,
    /// Number of lines feeding the gate.
    num_lines: usize,
}

impl OrGate {
    /// Creates a gate with `num_lines` inputs, all low.
    pub const fn new(num_lines: usize) -> Self {
        Self {
            levels: 0,
            num_lines,
        }
    }

    /// Records the new level of a source line.
    ///
    /// The caller validates `line`; an out-of-range index is a programming error.
    #[inline]
    pub fn set_line(&mut self, line: usize, level: bool) {
        debug_assert!(line < self.num_lines, "line {line} out of range");
        let bit = 1u32 << line;
        if level {
            self.levels |= bit;
        } else {
            self.levels &= !bit;
        }
    }

    /// Returns the bitmap of lines currently high.
    #[inline]
    pub const fn levels(&self) -> u32 {
        self.levels
    }

    /// Returns the gate output: `true` if any line is high.
    #[inline]
    pub const fn output(&self) -> bool {
        self.levels != 0
    }

    /// Returns the lines that are both high and enabled.
    #[inline]
    pub const fn selected(&self, enable: u32) -> u32 {
        self.levels & enable
    }
}
