//! Remote debug stub for the Nyuzi instruction-level simulator.
//!
//! This crate lets an external debugger (GDB or LLDB speaking the remote
//! serial protocol) control and inspect a simulated core over TCP:
//! 1. **Protocol:** Packet framing, checksums, acknowledgement, command parsing, and typed responses.
//! 2. **Registers:** The flat 64-id register space split into scalar and vector namespaces.
//! 3. **Session:** Per-connection ack mode, selected strand, and stop signals.
//! 4. **Execution:** Continue in fixed quanta until the client interrupts, and single step.
//! 5. **Server:** The single-client accept/read/dispatch loop and its state machine.
//! 6. **Target:** The simulator interface the stub consumes, plus an in-process reference core.

/// Shared constants and error types.
pub mod common;
/// Server, protocol and reference-target configuration.
pub mod config;
/// Command dispatch.
pub mod dispatch;
/// Continue, step and strand selection.
pub mod exec;
/// Wire protocol.
pub mod protocol;
/// Register addressing and formatting.
pub mod registers;
/// TCP server and connection state machine.
pub mod server;
/// Per-connection session state.
pub mod session;
/// Simulator interface and reference implementation.
pub mod target;

/// Root configuration; use `Config::default()` or `Config::from_file`.
pub use crate::config::Config;
/// Error type and result alias.
pub use crate::common::{StubError, StubResult};
/// Command router; one response per command.
pub use crate::dispatch::CommandDispatcher;
/// Listening server; construct with `Server::bind`.
pub use crate::server::Server;
/// Per-connection state.
pub use crate::session::Session;
/// Simulator interface and the in-process reference core.
pub use crate::target::{DebugTarget, ReferenceCore, RunState};
