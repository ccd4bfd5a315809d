//! Packet checksum.
//!
//! The checksum is the sum of the body bytes modulo 256, sent as two
//! lowercase hex digits. It is computed for outgoing packets only; incoming
//! checksum digits are read and discarded.

/// Returns the 8-bit additive checksum of `body`.
#[inline]
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Renders the checksum of `body` as two lowercase hex digits.
pub fn checksum_digits(body: &[u8]) -> [u8; 2] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let sum = checksum(body);
    [HEX[(sum >> 4) as usize], HEX[(sum & 0xf) as usize]]
}
