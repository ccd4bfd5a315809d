//! Simulator control and introspection interface.
//!
//! The stub never executes instructions itself. It drives a target through
//! the `DebugTarget` trait:
//! 1. **Time:** `advance` runs all strands for a quantum, `step` retires one instruction on the selected strand.
//! 2. **Strands:** `strand_count`, `selected_strand`, `select_strand`.
//! 3. **State:** Scalar and vector register access plus byte reads of memory.
//! 4. **Breakpoints:** Insert and remove software breakpoints by address.
//!
//! `ReferenceCore` is an in-process implementation used by the binary and the tests.

/// Text program-image loader.
pub mod image;
/// In-process reference target.
pub mod reference;

pub use reference::ReferenceCore;

/// Outcome of advancing the target by a quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The quantum completed and the core can keep running.
    Running,
    /// Execution stopped early: a breakpoint was reached or every strand halted.
    Stopped,
}

/// Interface a simulated core exposes to the debug stub.
///
/// Register and step operations act on the currently selected strand.
/// Indices passed to register accessors are namespace-local: `read_vector(3, _)`
/// reads `v3`, not flat debugger id 3.
pub trait DebugTarget {
    /// Number of hardware strands the core exposes.
    fn strand_count(&self) -> usize;

    /// Advances all running strands by up to `cycles` cycles.
    fn advance(&mut self, cycles: u32) -> RunState;

    /// Retires exactly one instruction on the selected strand.
    fn step(&mut self);

    /// Index of the selected strand.
    fn selected_strand(&self) -> usize;

    /// Selects the strand later register and step operations act on.
    ///
    /// Out-of-range indices are ignored.
    fn select_strand(&mut self, strand: usize);

    /// Reads scalar register `index` (0-31) of the selected strand.
    fn read_scalar(&self, index: usize) -> u32;

    /// Reads one 32-bit lane (0-15) of vector register `index` (0-31).
    fn read_vector(&self, index: usize, lane: usize) -> u32;

    /// Writes scalar register `index` of the selected strand.
    fn write_scalar(&mut self, index: usize, value: u32);

    /// Writes one lane of vector register `index` of the selected strand.
    fn write_vector(&mut self, index: usize, lane: usize, value: u32);

    /// Reads one byte of memory, or `None` past the end of memory.
    fn read_memory(&self, address: u32) -> Option<u8>;

    /// Inserts a software breakpoint. Returns `false` if `address` is not in memory.
    fn set_breakpoint(&mut self, address: u32) -> bool;

    /// Removes a software breakpoint. Returns `false` if none was set at `address`.
    fn clear_breakpoint(&mut self, address: u32) -> bool;
}
