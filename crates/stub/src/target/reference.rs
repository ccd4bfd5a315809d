//! In-process reference target.
//!
//! `ReferenceCore` models what the stub can observe of a Nyuzi core:
//! 1. **Strands:** Per-strand scalar and vector register files and a PC. Only strand 0 starts enabled.
//! 2. **Memory:** A flat byte array starting at address 0.
//! 3. **Execution:** Retiring an instruction advances the PC by 4. Instructions are not decoded.
//! 4. **Breakpoints:** A strand whose PC reaches a breakpoint stops the run before retiring it.
//!
//! Resuming a strand that stopped on a breakpoint retires that instruction
//! instead of stopping on it again.

use std::collections::BTreeSet;

use crate::common::constants::{PC_REGISTER, SCALAR_REGISTERS, VECTOR_LANES, VECTOR_REGISTERS};
use crate::common::{StubError, StubResult};
use crate::config::TargetConfig;
use crate::target::{DebugTarget, RunState};

/// Bytes per instruction word.
const INSTRUCTION_BYTES: u32 = 4;

/// Architectural state of one hardware strand.
#[derive(Debug, Clone)]
struct Strand {
    pc: u32,
    scalar: [u32; SCALAR_REGISTERS - 1],
    vector: [[u32; VECTOR_LANES]; VECTOR_REGISTERS],
    enabled: bool,
    /// Set when the strand stopped on a breakpoint; the next retire passes it.
    resume_past_breakpoint: bool,
}

impl Strand {
    const fn new(enabled: bool) -> Self {
        Self {
            pc: 0,
            scalar: [0; SCALAR_REGISTERS - 1],
            vector: [[0; VECTOR_LANES]; VECTOR_REGISTERS],
            enabled,
            resume_past_breakpoint: false,
        }
    }
}

/// Reference implementation of [`DebugTarget`].
#[derive(Debug, Clone)]
pub struct ReferenceCore {
    strands: Vec<Strand>,
    memory: Vec<u8>,
    breakpoints: BTreeSet<u32>,
    selected: usize,
    cycles: u64,
}

impl ReferenceCore {
    /// Creates a core with `strands` strands and `memory_size` bytes of zeroed memory.
    pub fn new(strands: usize, memory_size: usize) -> Self {
        let strands = (0..strands).map(|id| Strand::new(id == 0)).collect();
        Self {
            strands,
            memory: vec![0; memory_size],
            breakpoints: BTreeSet::new(),
            selected: 0,
            cycles: 0,
        }
    }

    /// Creates a core sized by `config`.
    pub fn from_config(config: &TargetConfig) -> Self {
        Self::new(config.strands, config.memory_size)
    }

    /// Copies `image` into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Returns `StubError::ImageTooLarge` if the image does not fit.
    pub fn load_image(&mut self, image: &[u8]) -> StubResult<()> {
        let available = self.memory.len();
        let dest = self
            .memory
            .get_mut(..image.len())
            .ok_or(StubError::ImageTooLarge {
                needed: image.len(),
                available,
            })?;
        dest.copy_from_slice(image);
        Ok(())
    }

    /// Program counter of `strand`.
    pub fn pc(&self, strand: usize) -> Option<u32> {
        self.strands.get(strand).map(|s| s.pc)
    }

    /// Sets the program counter of `strand`.
    pub fn set_pc(&mut self, strand: usize, pc: u32) {
        if let Some(s) = self.strands.get_mut(strand) {
            s.pc = pc;
        }
    }

    /// Starts or stops `strand` for subsequent `advance` calls.
    pub fn set_enabled(&mut self, strand: usize, enabled: bool) {
        if let Some(s) = self.strands.get_mut(strand) {
            s.enabled = enabled;
        }
    }

    /// Total cycles advanced so far.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Addresses of all inserted breakpoints, ascending.
    pub fn breakpoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Retires one instruction on `strand`. Returns `false` if it is parked on a breakpoint.
    fn retire(&mut self, strand: usize, honor_breakpoints: bool) -> bool {
        let Some(s) = self.strands.get_mut(strand) else {
            return true;
        };
        if honor_breakpoints && !s.resume_past_breakpoint && self.breakpoints.contains(&s.pc) {
            s.resume_past_breakpoint = true;
            return false;
        }
        s.resume_past_breakpoint = false;
        s.pc = s.pc.wrapping_add(INSTRUCTION_BYTES);
        true
    }
}

impl DebugTarget for ReferenceCore {
    fn strand_count(&self) -> usize {
        self.strands.len()
    }

    fn advance(&mut self, cycles: u32) -> RunState {
        for _ in 0..cycles {
            if !self.strands.iter().any(|s| s.enabled) {
                return RunState::Stopped;
            }
            self.cycles += 1;
            for strand in 0..self.strands.len() {
                if self.strands[strand].enabled && !self.retire(strand, true) {
                    return RunState::Stopped;
                }
            }
        }
        RunState::Running
    }

    fn step(&mut self) {
        self.cycles += 1;
        let _ = self.retire(self.selected, false);
    }

    fn selected_strand(&self) -> usize {
        self.selected
    }

    fn select_strand(&mut self, strand: usize) {
        if strand < self.strands.len() {
            self.selected = strand;
        }
    }

    fn read_scalar(&self, index: usize) -> u32 {
        let Some(s) = self.strands.get(self.selected) else {
            return 0;
        };
        if index == PC_REGISTER {
            s.pc
        } else {
            s.scalar.get(index).copied().unwrap_or(0)
        }
    }

    fn read_vector(&self, index: usize, lane: usize) -> u32 {
        self.strands
            .get(self.selected)
            .and_then(|s| s.vector.get(index))
            .and_then(|lanes| lanes.get(lane))
            .copied()
            .unwrap_or(0)
    }

    fn write_scalar(&mut self, index: usize, value: u32) {
        let Some(s) = self.strands.get_mut(self.selected) else {
            return;
        };
        if index == PC_REGISTER {
            s.pc = value;
            s.resume_past_breakpoint = false;
        } else if let Some(slot) = s.scalar.get_mut(index) {
            *slot = value;
        }
    }

    fn write_vector(&mut self, index: usize, lane: usize, value: u32) {
        if let Some(slot) = self
            .strands
            .get_mut(self.selected)
            .and_then(|s| s.vector.get_mut(index))
            .and_then(|lanes| lanes.get_mut(lane))
        {
            *slot = value;
        }
    }

    fn read_memory(&self, address: u32) -> Option<u8> {
        self.memory.get(address as usize).copied()
    }

    fn set_breakpoint(&mut self, address: u32) -> bool {
        if (address as usize) >= self.memory.len() {
            return false;
        }
        let _ = self.breakpoints.insert(address);
        true
    }

    fn clear_breakpoint(&mut self, address: u32) -> bool {
        self.breakpoints.remove(&address)
    }
}
