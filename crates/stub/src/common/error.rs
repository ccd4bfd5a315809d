//! Error types for the debug stub.
//!
//! Errors are local to their layer:
//! 1. **Startup:** `Bind` aborts the program; the listener cannot be created.
//! 2. **Session:** `Io` and `NoStrands` end the current connection only.
//! 3. **Setup:** `Config`, `Image` and `ImageTooLarge` come from loading files before serving.
//!
//! Unsupported commands and out-of-range register ids are not errors. They
//! are answered with an empty response body.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use crate::server::state::{StubEvent, StubState};

/// Every failure the stub can report.
#[derive(Debug, Error)]
pub enum StubError {
    /// Creating, configuring, binding or listening on the server socket failed.
    #[error("cannot {op} listening socket on {addr}: {source}")]
    Bind {
        /// Which socket call failed (`create`, `configure`, `bind`, `listen`).
        op: &'static str,
        /// Address the server tried to listen on.
        addr: SocketAddr,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Socket read or write failed on an active session.
    #[error("socket I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The target reported no hardware strands, so there is nothing to debug.
    #[error("target exposes {0} strands; at least one is required")]
    NoStrands(usize),

    /// The session state machine received an event it cannot handle.
    #[error("no transition from {state:?} on {event:?}")]
    InvalidTransition {
        /// State the machine was in.
        state: StubState,
        /// Event that was rejected.
        event: StubEvent,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A program image line is not a hex word.
    #[error("image line {line}: {text:?} is not a hex word")]
    Image {
        /// One-based line number.
        line: usize,
        /// Offending line contents.
        text: String,
    },

    /// A program image does not fit into target memory.
    #[error("image needs {needed} bytes but target memory holds {available}")]
    ImageTooLarge {
        /// Bytes required by the image.
        needed: usize,
        /// Bytes of target memory.
        available: usize,
    },
}

/// Result alias used throughout the stub.
pub type StubResult<T> = Result<T, StubError>;
