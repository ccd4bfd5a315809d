//! Register Space.
//!
//! - Ids 0-31 are scalars rendered as 8 hex digits.
//! - Ids 32-63 are vectors: 16 lanes, lane 0 first, 128 hex digits.
//! - Ids from 64 up are not registers.
//! - `qRegisterInfo` descriptions carry generic roles for ids 28-31.

use pretty_assertions::assert_eq;
use rstest::rstest;

use nyuzi_stub::registers::{self, RegisterInfo, RegisterKind, RegisterValue};
use nyuzi_stub::{DebugTarget, ReferenceCore};

use crate::common::mocks::target::RecordingTarget;

#[rstest]
#[case(0, 8)]
#[case(17, 8)]
#[case(31, 8)]
#[case(32, 128)]
#[case(63, 128)]
fn test_register_text_length(#[case] id: u64, #[case] digits: usize) {
    let target = RecordingTarget::new(1);
    let value = registers::read_register(&target, id).unwrap();
    assert_eq!(value.to_hex().len(), digits);
}

#[test]
fn test_invalid_ids_read_nothing() {
    let target = RecordingTarget::new(1);
    assert!(registers::read_register(&target, 64).is_none());
    assert!(registers::read_register(&target, 0x1000).is_none());
}

#[test]
fn test_vector_lanes_are_rendered_lane_zero_first() {
    let target = RecordingTarget::new(1);
    // Register 33 is vector index 1; RecordingTarget yields 0x100 + lane.
    let text = registers::read_register(&target, 33).unwrap().to_hex();
    assert_eq!(&text[..8], "00000100");
    assert_eq!(&text[8..16], "00000101");
    assert_eq!(&text[120..], "0000010f");
}

#[test]
fn test_scalar_is_zero_padded_hex() {
    let target = RecordingTarget::new(1);
    assert_eq!(registers::read_register(&target, 2).unwrap().to_hex(), "00000200");
}

#[test]
fn test_writes_land_on_the_selected_strand() {
    let mut core = ReferenceCore::new(2, 64);
    core.select_strand(1);
    let value = RegisterValue::from_hex(RegisterKind::Scalar(5), b"deadbeef").unwrap();
    assert!(registers::write_register(&mut core, 5, value));
    assert_eq!(core.read_scalar(5), 0xdead_beef);
    core.select_strand(0);
    assert_eq!(core.read_scalar(5), 0);
}

#[test]
fn test_vector_write_fills_every_lane() {
    let mut core = ReferenceCore::new(1, 64);
    let text: String = (0..16u32).map(|lane| format!("{:08x}", lane * 3)).collect();
    let value = RegisterValue::from_hex(RegisterKind::Vector(4), text.as_bytes()).unwrap();
    assert!(registers::write_register(&mut core, 36, value));
    assert_eq!(core.read_vector(4, 0), 0);
    assert_eq!(core.read_vector(4, 15), 45);
}

#[rstest]
#[case(RegisterKind::Scalar(0), &b"1234"[..])]
#[case(RegisterKind::Scalar(0), &b"12345678ab"[..])]
#[case(RegisterKind::Scalar(0), &b"zzzzzzzz"[..])]
#[case(RegisterKind::Vector(0), &b"00000000"[..])]
#[case(RegisterKind::Invalid, &b"00000000"[..])]
fn test_malformed_values_are_rejected(#[case] kind: RegisterKind, #[case] text: &[u8]) {
    assert!(RegisterValue::from_hex(kind, text).is_none());
}

#[test]
fn test_scalar_description() {
    let info = RegisterInfo::describe(3).unwrap();
    assert_eq!(
        info.to_string(),
        "name:s3;bitsize:32;encoding:uint;format:hex;\
         set:General Purpose Scalar Registers;gcc:3;dwarf:3;"
    );
    assert_eq!(info.generic_role(), None);
}

#[rstest]
#[case(28, "fp")]
#[case(29, "sp")]
#[case(30, "ra")]
#[case(31, "pc")]
fn test_generic_roles(#[case] id: u64, #[case] role: &str) {
    let info = RegisterInfo::describe(id).unwrap();
    assert_eq!(info.generic_role(), Some(role));
    assert!(info.to_string().ends_with(&format!("generic:{role};")));
}

#[test]
fn test_vector_description() {
    let info = RegisterInfo::describe(40).unwrap();
    assert_eq!(
        info.to_string(),
        "name:v8;bitsize:512;encoding:uint;format:vector-uint32;\
         set:General Purpose Vector Registers;gcc:40;dwarf:40;"
    );
}

#[test]
fn test_no_description_past_the_register_file() {
    assert!(RegisterInfo::describe(64).is_none());
}
