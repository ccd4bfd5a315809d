//! Execution control for continue, single-step, and strand selection.
//!
//! Continue is cooperative: the controller alternates fixed quanta of
//! simulated cycles with a readiness check on the client socket. The target
//! never preempts itself; the only interrupt is client input.
//!
//! Every stop is reported as a trap, whether it came from a breakpoint, a
//! client interrupt, or a completed step.

/// Readiness probes used as the interrupt signal.
pub mod probe;

use std::io::ErrorKind;

use tracing::{trace, warn};

use crate::config::ExecutionConfig;
use crate::target::{DebugTarget, RunState};

pub use probe::{InterruptProbe, PollProbe};

/// Why a continue stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// The client sent bytes.
    Interrupted,
    /// The target stopped on its own (breakpoint or all strands halted).
    TargetStopped,
    /// The readiness wait failed with a non-retryable error.
    WaitFailed,
}

/// Drives the target's time-stepping interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionController {
    quantum_cycles: u32,
}

impl ExecutionController {
    /// Creates a controller that advances `quantum_cycles` cycles per quantum.
    pub const fn new(quantum_cycles: u32) -> Self {
        Self { quantum_cycles }
    }

    /// Creates a controller from execution settings.
    pub const fn from_config(config: &ExecutionConfig) -> Self {
        Self::new(config.quantum_cycles)
    }

    /// Cycles per quantum.
    pub const fn quantum_cycles(&self) -> u32 {
        self.quantum_cycles
    }

    /// Runs the target until the client interrupts or the target stops.
    ///
    /// After each quantum the probe is consulted. Retryable wait errors
    /// (`EINTR`) run another quantum; any other wait error ends the run.
    pub fn continue_until_interrupt<T, P>(&self, target: &mut T, probe: &mut P) -> StopCause
    where
        T: DebugTarget + ?Sized,
        P: InterruptProbe + ?Sized,
    {
        let mut quanta: u64 = 0;
        let cause = loop {
            quanta += 1;
            if target.advance(self.quantum_cycles) == RunState::Stopped {
                break StopCause::TargetStopped;
            }
            match probe.interrupt_pending() {
                Ok(true) => break StopCause::Interrupted,
                Ok(false) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!(error = %e, "readiness wait failed; stopping target");
                    break StopCause::WaitFailed;
                }
            }
        };
        trace!(?cause, quanta, "continue finished");
        cause
    }

    /// Retires one instruction on the selected strand.
    pub fn single_step<T: DebugTarget + ?Sized>(&self, target: &mut T) {
        target.step();
    }

    /// Selects `strand` on the target. Returns `false` and changes nothing if out of range.
    pub fn select_strand<T: DebugTarget + ?Sized>(&self, target: &mut T, strand: usize) -> bool {
        if strand >= target.strand_count() {
            return false;
        }
        target.select_strand(strand);
        true
    }
}

impl Default for ExecutionController {
    fn default() -> Self {
        Self::from_config(&ExecutionConfig::default())
    }
}
