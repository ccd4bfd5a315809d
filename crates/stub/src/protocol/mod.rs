//! Wire protocol: checksums, packet framing, command parsing, and response rendering.
//!
//! Packets are ASCII `$<body>#<checksum>`. Each inbound packet is acknowledged
//! with `+` unless the client switched to no-ack mode.

/// Additive packet checksum.
pub mod checksum;
/// Inbound command parsing.
pub mod command;
/// Typed response bodies.
pub mod response;
/// Packet framing over a byte stream.
pub mod transport;

pub use checksum::{checksum, checksum_digits};
pub use command::Command;
pub use response::Response;
pub use transport::{Packet, PacketTransport};
