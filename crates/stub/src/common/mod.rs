//! Types and constants shared by every layer of the stub.
//!
//! 1. **Constants:** Packet delimiters, signal numbers, register-file geometry.
//! 2. **Errors:** The `StubError` taxonomy and `StubResult` alias.

/// Protocol and register-file constants.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{NO_SIGNAL, TRAP_SIGNAL};
pub use error::{StubError, StubResult};
