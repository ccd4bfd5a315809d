//! Configuration for the debug stub.
//!
//! This module defines the configuration structures used to parameterize the server. It provides:
//! 1. **Defaults:** Port, backlog, packet capacity, execution quantum, and reference-target geometry.
//! 2. **Structures:** Hierarchical config for the server socket, packet protocol, execution, and target.
//!
//! Configuration is read from JSON (`Config::from_file`) or built with `Config::default()`;
//! the CLI overrides individual fields after loading.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::common::StubResult;

/// Default configuration constants.
mod defaults {
    use std::net::{IpAddr, Ipv4Addr};

    /// Listen on every interface.
    pub const BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

    /// TCP port the debugger connects to.
    pub const PORT: u16 = 8000;

    /// Pending connections the kernel may queue before `accept`.
    pub const BACKLOG: i32 = 4;

    /// Receive buffer for one packet body, in bytes.
    ///
    /// Bodies longer than this are truncated without an error.
    pub const PACKET_CAPACITY: usize = 256;

    /// Simulated cycles advanced between interrupt checks while continuing.
    pub const QUANTUM_CYCLES: u32 = 1000;

    /// Readiness wait between quanta, in milliseconds.
    ///
    /// Negative waits until the client sends a byte. Zero checks without
    /// blocking and keeps the target running between checks.
    pub const POLL_TIMEOUT_MS: i32 = -1;

    /// Hardware strands per core on the reference target.
    pub const STRANDS: usize = 4;

    /// Reference target memory size (16 MiB).
    pub const MEMORY_SIZE: usize = 16 * 1024 * 1024;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use nyuzi_stub::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.server.port, 8000);
/// assert_eq!(config.execution.quantum_cycles, 1000);
/// ```
///
/// Partial JSON keeps the defaults for everything it omits:
///
/// ```
/// use nyuzi_stub::config::Config;
///
/// let config = Config::from_json(r#"{ "server": { "port": 2159 } }"#).unwrap();
/// assert_eq!(config.server.port, 2159);
/// assert_eq!(config.server.backlog, 4);
/// assert_eq!(config.protocol.packet_capacity, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listening socket settings.
    pub server: ServerConfig,
    /// Packet framing settings.
    pub protocol: ProtocolConfig,
    /// Continue-mode pacing.
    pub execution: ExecutionConfig,
    /// Reference target geometry.
    pub target: TargetConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Config` if the JSON is malformed or has wrongly typed fields.
    pub fn from_json(text: &str) -> StubResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Io` if the file cannot be read and `StubError::Config` if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> StubResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Listening socket settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface address to bind.
    pub bind_address: IpAddr,
    /// TCP port; 0 lets the OS pick one.
    pub port: u16,
    /// Listen backlog.
    pub backlog: i32,
}

impl ServerConfig {
    /// Socket address the server binds.
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Loopback configuration on an OS-assigned port.
    pub const fn loopback() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            backlog: defaults::BACKLOG,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::BIND_ADDRESS,
            port: defaults::PORT,
            backlog: defaults::BACKLOG,
        }
    }
}

/// Packet framing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Maximum packet body kept per read; extra bytes are dropped.
    pub packet_capacity: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            packet_capacity: defaults::PACKET_CAPACITY,
        }
    }
}

/// Continue-mode pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Cycles advanced per quantum.
    pub quantum_cycles: u32,
    /// Readiness wait between quanta in milliseconds; negative blocks indefinitely.
    pub poll_timeout_ms: i32,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            quantum_cycles: defaults::QUANTUM_CYCLES,
            poll_timeout_ms: defaults::POLL_TIMEOUT_MS,
        }
    }
}

/// Reference target geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Hardware strands per core.
    pub strands: usize,
    /// Memory size in bytes.
    pub memory_size: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            strands: defaults::STRANDS,
            memory_size: defaults::MEMORY_SIZE,
        }
    }
}
