//! Protocol and register-file constants shared across the stub.

/// Signal number reported for every stop (`SIGTRAP`).
pub const TRAP_SIGNAL: u8 = 5;

/// Signal value a strand reports before it has ever stopped.
pub const NO_SIGNAL: u8 = 0;

/// Byte that opens a packet.
pub const PACKET_START: u8 = b'$';

/// Byte that closes a packet body; two checksum digits follow it.
pub const PACKET_END: u8 = b'#';

/// Positive acknowledgement byte.
pub const ACK: u8 = b'+';

/// Number of checksum digits trailing the end delimiter.
pub const CHECKSUM_DIGITS: usize = 2;

/// Number of scalar registers (`s0`-`s31`); debugger ids 0..32.
pub const SCALAR_REGISTERS: usize = 32;

/// Number of vector registers (`v0`-`v31`); debugger ids 32..64.
pub const VECTOR_REGISTERS: usize = 32;

/// Total flat debugger register ids. Ids at or above this are invalid.
pub const TOTAL_REGISTERS: usize = SCALAR_REGISTERS + VECTOR_REGISTERS;

/// 32-bit lanes per vector register.
pub const VECTOR_LANES: usize = 16;

/// Hex characters needed to print one 32-bit register or lane.
pub const HEX_DIGITS_PER_WORD: usize = 8;

/// First scalar id that carries a generic role name.
pub const FIRST_GENERIC_REGISTER: usize = 28;

/// Generic role names for scalar registers 28..32, in id order.
pub const GENERIC_REGISTER_ROLES: [&str; 4] = ["fp", "sp", "ra", "pc"];

/// Scalar register index that reads as the program counter.
pub const PC_REGISTER: usize = 31;

/// Largest memory read served in one response, in bytes.
pub const MAX_MEMORY_READ: usize = 1024;
