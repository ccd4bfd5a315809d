//! Typed response bodies.
//!
//! Every reply the dispatcher produces is a `Response` variant. The wire text
//! is rendered in one place, so each category (plain status, stop report,
//! register dump, thread list) always has the same shape.

use std::fmt::{self, Write as _};

use crate::registers::{RegisterInfo, RegisterValue};

/// Host descriptor reported for `qHostInfo`.
pub const HOST_INFO: &str = "triple:nyuzi;endian:little;ptrsize:4";

/// Process descriptor reported for `qProcessInfo`.
pub const PROCESS_INFO: &str = "pid:1";

/// Resume actions advertised for `vCont?`.
pub const CONT_ACTIONS: &str = "vCont;C;c;S;s";

/// A response body, before framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Empty body: the command is unsupported or its argument is out of range.
    Empty,
    /// `OK`.
    Ok,
    /// Architecture, endianness and pointer size.
    HostInfo,
    /// Fixed process id.
    ProcessInfo,
    /// First thread-list chunk naming every strand, `m1,2,...` in hex.
    ThreadList {
        /// Number of strands to list.
        strands: usize,
    },
    /// End-of-list marker `l`.
    EndOfThreadList,
    /// Current thread as `QC<id>`, where the id is the strand index plus one.
    CurrentThread {
        /// Zero-based strand index.
        strand: usize,
    },
    /// Stop report `S<signal>`.
    Signal(u8),
    /// Register contents in hex.
    Register(RegisterValue),
    /// Register description for `qRegisterInfo`.
    RegisterInfo(RegisterInfo),
    /// Memory bytes in hex, two digits per byte.
    Memory(Vec<u8>),
    /// Supported `vCont` actions.
    ContActions,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Ok => f.write_str("OK"),
            Self::HostInfo => f.write_str(HOST_INFO),
            Self::ProcessInfo => f.write_str(PROCESS_INFO),
            Self::ThreadList { strands } => {
                f.write_char('m')?;
                for strand in 0..*strands {
                    if strand > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{:x}", strand + 1)?;
                }
                Ok(())
            }
            Self::EndOfThreadList => f.write_char('l'),
            Self::CurrentThread { strand } => write!(f, "QC{:02x}", strand + 1),
            Self::Signal(signal) => write!(f, "S{signal:02x}"),
            Self::Register(value) => f.write_str(&value.to_hex()),
            Self::RegisterInfo(info) => write!(f, "{info}"),
            Self::Memory(bytes) => bytes.iter().try_for_each(|b| write!(f, "{b:02x}")),
            Self::ContActions => f.write_str(CONT_ACTIONS),
        }
    }
}

impl Response {
    /// Wire body bytes.
    pub fn to_body(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}
