//! Packet Framing.
//!
//! Verifies the `$body#cs` frame reader and writer:
//!
//! - Checksums are the byte sum mod 256 as two lowercase hex digits.
//! - Bytes before `$` are skipped and the inbound checksum is never checked.
//! - Bodies longer than the buffer are truncated, not rejected.
//! - End of stream is a clean close; read errors propagate.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use nyuzi_stub::StubError;
use nyuzi_stub::protocol::{PacketTransport, checksum, checksum_digits};

use crate::common::mocks::stream::{BrokenStream, MockStream};

fn transport(input: &[u8]) -> PacketTransport<MockStream> {
    PacketTransport::new(MockStream::new(input), 256)
}

#[test]
fn test_checksum_of_known_bodies() {
    assert_eq!(checksum(b""), 0);
    assert_eq!(checksum(b"OK"), 0x9a);
    assert_eq!(&checksum_digits(b"OK"), b"9a");
    assert_eq!(&checksum_digits(b"S05"), b"b8");
}

proptest! {
    /// The checksum is the wrapping byte sum, rendered as two lowercase hex digits.
    #[test]
    fn test_checksum_is_byte_sum_mod_256(body in proptest::collection::vec(any::<u8>(), 0..512)) {
        let expected = body.iter().map(|&b| u32::from(b)).sum::<u32>() % 256;
        prop_assert_eq!(u32::from(checksum(&body)), expected);
        let digits = checksum_digits(&body);
        prop_assert_eq!(String::from_utf8(digits.to_vec()).unwrap(), format!("{expected:02x}"));
    }

    /// Any body that fits the buffer and avoids `#` reads back unchanged.
    #[test]
    fn test_bodies_read_back_verbatim(body in "[a-zA-Z0-9;:,=?]{0,200}") {
        let frame = format!("${body}#00");
        let mut t = transport(frame.as_bytes());
        let packet = t.read_packet().unwrap().unwrap();
        prop_assert_eq!(packet.body(), body.as_bytes());
        prop_assert!(!packet.truncated());
    }
}

#[test]
fn test_noise_before_start_is_skipped() {
    let mut t = transport(b"+++garbage$qC#b4");
    let packet = t.read_packet().unwrap().unwrap();
    assert_eq!(packet.body(), b"qC");
}

#[test]
fn test_bad_checksum_is_accepted() {
    let mut t = transport(b"$qHostInfo#zz$?#00");
    assert_eq!(t.read_packet().unwrap().unwrap().body(), b"qHostInfo");
    assert_eq!(t.read_packet().unwrap().unwrap().body(), b"?");
}

#[test]
fn test_oversized_body_is_truncated_to_capacity() {
    let body = "a".repeat(300);
    let frame = format!("${body}#00$?#3f");
    let mut t = transport(frame.as_bytes());
    let packet = t.read_packet().unwrap().unwrap();
    assert_eq!(packet.body().len(), 256);
    assert!(packet.truncated());
    // The rest of the oversized body is consumed with it.
    assert_eq!(t.read_packet().unwrap().unwrap().body(), b"?");
}

#[test]
fn test_end_of_stream_is_a_clean_close() {
    assert!(transport(b"").read_packet().unwrap().is_none());
    assert!(transport(b"$qC").read_packet().unwrap().is_none());
}

#[test]
fn test_missing_checksum_digits_still_deliver_the_body() {
    let mut t = transport(b"$qC#");
    assert_eq!(t.read_packet().unwrap().unwrap().body(), b"qC");
    assert!(t.read_packet().unwrap().is_none());
}

#[test]
fn test_read_errors_propagate() {
    let mut t = PacketTransport::new(BrokenStream, 256);
    assert!(matches!(t.read_packet(), Err(StubError::Io(_))));
}

#[test]
fn test_sent_packets_are_framed() {
    let mut t = transport(b"");
    t.send_packet(b"OK").unwrap();
    t.send_packet(b"").unwrap();
    t.send_ack().unwrap();
    assert_eq!(t.into_inner().output, b"$OK#9a$#00+");
}

#[test]
fn test_write_errors_propagate() {
    let mut t = PacketTransport::new(BrokenStream, 256);
    assert!(matches!(t.send_packet(b"OK"), Err(StubError::Io(_))));
}
