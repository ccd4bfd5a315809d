//! Debugger register addressing.
//!
//! The debugger sees one flat id space of 64 registers:
//! 1. **Scalar:** ids 0-31 map to `s0`-`s31`, 32 bits each. `s28`-`s31` carry the generic roles fp, sp, ra and pc.
//! 2. **Vector:** ids 32-63 map to `v0`-`v31`, 16 lanes of 32 bits each.
//!
//! Ids from 64 up are invalid and produce an empty response, never an error.

use std::fmt;

use crate::common::constants::{
    FIRST_GENERIC_REGISTER, GENERIC_REGISTER_ROLES, HEX_DIGITS_PER_WORD, SCALAR_REGISTERS,
    TOTAL_REGISTERS, VECTOR_LANES,
};
use crate::target::DebugTarget;

/// Namespace and index a flat debugger id resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// Scalar register `s<n>`.
    Scalar(usize),
    /// Vector register `v<n>`.
    Vector(usize),
    /// Id outside both namespaces.
    Invalid,
}

impl RegisterKind {
    /// Classifies a flat debugger register id.
    pub const fn classify(id: u64) -> Self {
        if id < SCALAR_REGISTERS as u64 {
            Self::Scalar(id as usize)
        } else if id < TOTAL_REGISTERS as u64 {
            Self::Vector(id as usize - SCALAR_REGISTERS)
        } else {
            Self::Invalid
        }
    }
}

/// Contents of one register as read from or written to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterValue {
    /// A 32-bit scalar.
    Scalar(u32),
    /// Sixteen 32-bit lanes, lane 0 first.
    Vector([u32; VECTOR_LANES]),
}

impl RegisterValue {
    /// Renders the value as hex text.
    ///
    /// Scalars print as 8 digits, most significant first. Vectors print as the
    /// concatenation of their 16 lanes, lane 0 first, 128 digits in total.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Scalar(value) => format!("{value:08x}"),
            Self::Vector(lanes) => lanes.iter().map(|lane| format!("{lane:08x}")).collect(),
        }
    }

    /// Parses hex text produced by [`to_hex`](Self::to_hex) for a register of `kind`.
    ///
    /// Returns `None` for invalid ids, wrong lengths, or non-hex characters.
    pub fn from_hex(kind: RegisterKind, text: &[u8]) -> Option<Self> {
        match kind {
            RegisterKind::Scalar(_) if text.len() == HEX_DIGITS_PER_WORD => {
                parse_word(text).map(Self::Scalar)
            }
            RegisterKind::Vector(_) if text.len() == HEX_DIGITS_PER_WORD * VECTOR_LANES => {
                let mut lanes = [0u32; VECTOR_LANES];
                for (lane, chunk) in lanes.iter_mut().zip(text.chunks(HEX_DIGITS_PER_WORD)) {
                    *lane = parse_word(chunk)?;
                }
                Some(Self::Vector(lanes))
            }
            _ => None,
        }
    }
}

fn parse_word(text: &[u8]) -> Option<u32> {
    let text = std::str::from_utf8(text).ok()?;
    u32::from_str_radix(text, 16).ok()
}

/// Reads the register with flat id `id` from the selected strand.
pub fn read_register<T: DebugTarget + ?Sized>(target: &T, id: u64) -> Option<RegisterValue> {
    match RegisterKind::classify(id) {
        RegisterKind::Scalar(index) => Some(RegisterValue::Scalar(target.read_scalar(index))),
        RegisterKind::Vector(index) => {
            let mut lanes = [0u32; VECTOR_LANES];
            for (lane, slot) in lanes.iter_mut().enumerate() {
                *slot = target.read_vector(index, lane);
            }
            Some(RegisterValue::Vector(lanes))
        }
        RegisterKind::Invalid => None,
    }
}

/// Writes `value` to the register with flat id `id` on the selected strand.
///
/// Returns `false` without touching the target if the id is invalid or the
/// value's shape does not match the namespace.
pub fn write_register<T: DebugTarget + ?Sized>(target: &mut T, id: u64, value: RegisterValue) -> bool {
    match (RegisterKind::classify(id), value) {
        (RegisterKind::Scalar(index), RegisterValue::Scalar(word)) => {
            target.write_scalar(index, word);
            true
        }
        (RegisterKind::Vector(index), RegisterValue::Vector(lanes)) => {
            for (lane, word) in lanes.into_iter().enumerate() {
                target.write_vector(index, lane, word);
            }
            true
        }
        _ => false,
    }
}

/// Description returned for a register-info query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    id: usize,
    kind: RegisterKind,
}

impl RegisterInfo {
    /// Describes flat id `id`, or `None` if it is invalid.
    pub const fn describe(id: u64) -> Option<Self> {
        match RegisterKind::classify(id) {
            RegisterKind::Invalid => None,
            kind => Some(Self {
                id: id as usize,
                kind,
            }),
        }
    }

    /// Generic role name (`fp`, `sp`, `ra`, `pc`) for scalar ids 28-31.
    pub fn generic_role(&self) -> Option<&'static str> {
        match self.kind {
            RegisterKind::Scalar(index) if index >= FIRST_GENERIC_REGISTER => {
                GENERIC_REGISTER_ROLES.get(index - FIRST_GENERIC_REGISTER).copied()
            }
            _ => None,
        }
    }
}

impl fmt::Display for RegisterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id;
        match self.kind {
            RegisterKind::Scalar(index) => {
                write!(
                    f,
                    "name:s{index};bitsize:32;encoding:uint;format:hex;\
                     set:General Purpose Scalar Registers;gcc:{id};dwarf:{id};"
                )?;
                if let Some(role) = self.generic_role() {
                    write!(f, "generic:{role};")?;
                }
                Ok(())
            }
            RegisterKind::Vector(index) => write!(
                f,
                "name:v{index};bitsize:512;encoding:uint;format:vector-uint32;\
                 set:General Purpose Vector Registers;gcc:{id};dwarf:{id};"
            ),
            RegisterKind::Invalid => Ok(()),
        }
    }
}
