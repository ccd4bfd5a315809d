//! Per-connection debugger session state.
//!
//! A `Session` is created when a client connects and dropped when it
//! disconnects. It records:
//! 1. **Ack mode:** Whether inbound packets are acknowledged with `+`.
//! 2. **Selected strand:** The strand register reads, steps and stop reports refer to.
//! 3. **Stop signals:** The last stop signal of every strand, sized from the target.

use crate::common::{NO_SIGNAL, StubError, StubResult};

/// Acknowledgement discipline for inbound packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckMode {
    /// Every inbound packet is answered with `+` before its response.
    #[default]
    Required,
    /// The client asked for no-ack mode; nothing is acknowledged.
    Disabled,
}

/// State owned by one debugger connection.
#[derive(Debug, Clone)]
pub struct Session {
    ack_mode: AckMode,
    selected_strand: usize,
    last_signals: Vec<u8>,
}

impl Session {
    /// Starts a session for a target with `strand_count` strands.
    ///
    /// Ack mode starts as required, strand 0 is selected, and no strand has a
    /// stop signal yet.
    ///
    /// # Errors
    ///
    /// Returns `StubError::NoStrands` if `strand_count` is zero.
    pub fn new(strand_count: usize) -> StubResult<Self> {
        if strand_count == 0 {
            return Err(StubError::NoStrands(strand_count));
        }
        Ok(Self {
            ack_mode: AckMode::Required,
            selected_strand: 0,
            last_signals: vec![NO_SIGNAL; strand_count],
        })
    }

    /// Current acknowledgement discipline.
    pub const fn ack_mode(&self) -> AckMode {
        self.ack_mode
    }

    /// True while inbound packets must be acknowledged.
    pub fn ack_required(&self) -> bool {
        self.ack_mode == AckMode::Required
    }

    /// Stops acknowledging packets for the rest of the session.
    pub const fn disable_acks(&mut self) {
        self.ack_mode = AckMode::Disabled;
    }

    /// Number of strands this session tracks.
    pub fn strand_count(&self) -> usize {
        self.last_signals.len()
    }

    /// Index of the selected strand.
    pub const fn selected_strand(&self) -> usize {
        self.selected_strand
    }

    /// Records a strand selection. Returns `false` and keeps the old one if out of range.
    pub fn select_strand(&mut self, strand: usize) -> bool {
        if strand < self.last_signals.len() {
            self.selected_strand = strand;
            true
        } else {
            false
        }
    }

    /// Last stop signal of `strand`; strands that never stopped report 0.
    pub fn last_signal(&self, strand: usize) -> u8 {
        self.last_signals.get(strand).copied().unwrap_or(NO_SIGNAL)
    }

    /// Records why `strand` stopped.
    pub fn record_stop(&mut self, strand: usize, signal: u8) {
        if let Some(slot) = self.last_signals.get_mut(strand) {
            *slot = signal;
        }
    }
}
