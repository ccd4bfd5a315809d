//! Program images in hex-word text form.
//!
//! Each non-blank line holds one 32-bit word in hex, most significant digit
//! first. Words are laid out in memory in the order their bytes are written,
//! so the line `12345678` occupies bytes `12 34 56 78`.

use std::fs;
use std::path::Path;

use crate::common::{StubError, StubResult};

/// Parses hex-word text into the memory bytes it describes.
///
/// # Errors
///
/// Returns `StubError::Image` for the first line that is not a 32-bit hex word.
pub fn parse_hex_image(text: &str) -> StubResult<Vec<u8>> {
    let mut bytes = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let value = u32::from_str_radix(word, 16).map_err(|_| StubError::Image {
            line: index + 1,
            text: word.to_owned(),
        })?;
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    Ok(bytes)
}

/// Reads and parses a hex-word image file.
///
/// # Errors
///
/// Returns `StubError::Io` if the file cannot be read and `StubError::Image` if a line does not parse.
pub fn load_hex_file(path: impl AsRef<Path>) -> StubResult<Vec<u8>> {
    let text = fs::read_to_string(path)?;
    parse_hex_image(&text)
}
