//! Per-pin interrupt state machine.
//!
//! A pin's state is the triple (mask, status, pending), plus the set of enabled lines:
//!
//! * `enable` grows by set-union through enable register writes and is never cleared by them.
//! * `mask` holds lines whose service routine is still running (the pin is "in ISR").
//! * `pending` queues lines that rose while firmware could not be notified.
//! * `status` is the guest-visible status register: lines firmware has been told about and
//!   has not acknowledged yet. It lives in the register file and is passed in by reference.
//!
//! Pending lines are promoted to status only once status fully drains to zero, so at most one
//! of the two drives an assert at a time.
//!
//! Every transition returns an outcome describing what happened; the caller logs it and drives
//! the output line when the outcome carries a level.

use crate::common::constants::STATUS_REINIT;

/// Interrupt bookkeeping of one input pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinState {
    /// Lines permitted to raise this pin.
    pub enable: u32,
    /// Lines suppressed while their service routine runs.
    pub mask: u32,
    /// Lines that fired while notification could not be delivered.
    pub pending: u32,
}

/// Result of evaluating a pin while its gate output is high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// No enabled line is asserted; nothing changed.
    Unselected,
    /// The pin is busy; `selected` lines were merged into pending.
    Queued {
        /// Lines that were merged.
        selected: u32,
        /// Pending bitmap after the merge.
        pending: u32,
    },
    /// The pin was idle; status now holds `status` and the output must be asserted.
    Triggered {
        /// New status register value.
        status: u32,
    },
}

/// Result of an enable register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnableWrite {
    /// Zero written to a pin with nothing enabled.
    Idle,
    /// New lines were enabled.
    Enabled {
        /// Enable bitmap after the write.
        enable: u32,
    },
    /// Bits driven high on an already-enabled set: those lines leave ISR mode.
    Unmasked {
        /// Bits that changed in the register.
        change: u32,
        /// Mask bitmap after the write.
        mask: u32,
    },
    /// Bits driven low on an already-enabled set: those lines enter ISR mode.
    Masked {
        /// Bits that changed in the register.
        change: u32,
        /// Mask bitmap after the write.
        mask: u32,
    },
}

/// Result of a nonzero status register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusWrite {
    /// All-ones write: the register was reinitialized; pending and output untouched.
    Reinitialized,
    /// Some notified lines remain unacknowledged.
    Outstanding {
        /// Status register value after the write.
        status: u32,
    },
    /// Status drained and pending lines were promoted; the output must be asserted.
    Replayed {
        /// New status register value (the former pending bitmap).
        status: u32,
    },
    /// Status drained with nothing pending; the output must be deasserted.
    Drained,
}

impl Transition {
    /// Returns the output level to drive, if any.
    pub const fn output_level(self) -> Option<bool> {
        match self {
            Self::Triggered { .. } => Some(true),
            Self::Unselected | Self::Queued { .. } => None,
        }
    }
}

impl StatusWrite {
    /// Returns the output level to drive, if any.
    pub const fn output_level(self) -> Option<bool> {
        match self {
            Self::Replayed { .. } => Some(true),
            Self::Drained => Some(false),
            Self::Reinitialized | Self::Outstanding { .. } => None,
        }
    }
}

impl PinState {
    /// Handles an active gate output given the lines that are both high and enabled.
    ///
    /// A gate whose lines are all low never reaches this function; it changes no pin state.
    ///
    /// # Arguments
    ///
    /// * `selected` - Asserted lines masked with `enable`.
    /// * `status` - The pin's status register.
    pub fn on_active(&mut self, selected: u32, status: &mut u32) -> Transition {
        if selected == 0 {
            return Transition::Unselected;
        }

        if self.mask != 0 || *status != 0 {
            // In ISR mode, or firmware has not finished with the previous notification.
            self.pending |= selected;
            Transition::Queued {
                selected,
                pending: self.pending,
            }
        } else {
            *status = selected;
            Transition::Triggered { status: selected }
        }
    }

    /// Handles a guest write to the pin's enable register.
    ///
    /// The register both enables lines and toggles ISR masking. A write that enables no new
    /// line is a mask toggle: bits changed to 1 unmask, bits changed to 0 mask.
    ///
    /// # Arguments
    ///
    /// * `reg` - The enable register; always ends holding `data`.
    /// * `data` - The written value.
    pub fn on_enable_write(&mut self, reg: &mut u32, data: u32) -> EnableWrite {
        if data == 0 && self.enable == 0 {
            *reg = data;
            return EnableWrite::Idle;
        }

        let old_enable = self.enable;
        self.enable |= data;
        if old_enable != self.enable {
            *reg = data;
            return EnableWrite::Enabled {
                enable: self.enable,
            };
        }

        let change = *reg ^ data;
        let outcome = if change & data != 0 {
            self.mask &= !change;
            EnableWrite::Unmasked {
                change,
                mask: self.mask,
            }
        } else {
            self.mask |= change;
            EnableWrite::Masked {
                change,
                mask: self.mask,
            }
        };
        *reg = data;
        outcome
    }

    /// Handles a nonzero guest write to the pin's status register.
    ///
    /// Written 1-bits acknowledge lines (write-1-to-clear). Once status reaches zero, pending
    /// lines are replayed into it; with nothing pending the output is released.
    ///
    /// # Arguments
    ///
    /// * `status` - The pin's status register.
    /// * `data` - The written value; the caller rejects zero.
    pub fn on_status_write(&mut self, status: &mut u32, data: u32) -> StatusWrite {
        debug_assert!(data != 0, "zero status writes are rejected by the caller");
        *status &= !data;

        // All ones initializes the register rather than acknowledging every line.
        if data == STATUS_REINIT {
            return StatusWrite::Reinitialized;
        }

        if *status != 0 {
            return StatusWrite::Outstanding { status: *status };
        }

        if self.pending != 0 {
            *status = self.pending;
            self.pending = 0;
            StatusWrite::Replayed { status: *status }
        } else {
            StatusWrite::Drained
        }
    }
}
