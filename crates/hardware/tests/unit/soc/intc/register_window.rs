//! Register window decoding and raw storage tests.

use crate::common::harness::{ast2700, en, snapshot, st, with_pins};
use intc_core::IntcError;
use rstest::rstest;

#[rstest]
#[case(0x008)]
#[case(0x0fc)]
#[case(0x108)]
#[case(0x400 + 0x80)]
fn test_unclaimed_offsets_are_plain_storage(#[case] offset: u64) {
    let mut intc = ast2700();
    intc.write(offset, 0xdead_beef).unwrap();
    assert_eq!(intc.read(offset).unwrap(), 0xdead_beef);
    assert_eq!(intc.enable(0), Some(0));
}

#[test]
fn test_status_register_reads_raw_value() {
    let mut intc = ast2700();
    intc.write(en(5), 0x80).unwrap();
    intc.set_irq(5, 7, true).unwrap();
    assert_eq!(intc.read(st(5)).unwrap(), 0x80);
}

#[test]
fn test_reads_have_no_side_effects() {
    let mut intc = ast2700();
    intc.write(en(0), 0x1).unwrap();
    intc.set_irq(0, 0, true).unwrap();
    let before = snapshot(&intc);
    for offset in (0..0x808).step_by(4) {
        let _ = intc.read(offset).unwrap();
    }
    assert_eq!(snapshot(&intc), before);
}

#[test]
fn test_last_status_register_is_in_window() {
    let mut intc = ast2700();
    intc.write(en(8), 0x1).unwrap();
    intc.set_irq(8, 0, true).unwrap();
    assert_eq!(intc.read(0x804).unwrap(), 0x1);
}

#[rstest]
#[case(0x808)]
#[case(0x900)]
#[case(0x4000)]
fn test_offsets_past_register_file_are_rejected(#[case] offset: u64) {
    let mut intc = ast2700();
    let before = snapshot(&intc);
    let err = IntcError::OffsetOutOfRange {
        offset,
        size: 0x808,
    };
    assert_eq!(intc.read(offset), Err(err.clone()));
    assert_eq!(intc.write(offset, 1), Err(err));
    assert_eq!(snapshot(&intc), before);
}

#[rstest]
#[case(0x001)]
#[case(0x002)]
#[case(0x103)]
fn test_unaligned_offsets_are_rejected(#[case] offset: u64) {
    let mut intc = ast2700();
    let before = snapshot(&intc);
    assert_eq!(
        intc.read(offset),
        Err(IntcError::UnalignedAccess { offset })
    );
    assert_eq!(
        intc.write(offset, 1),
        Err(IntcError::UnalignedAccess { offset })
    );
    assert_eq!(snapshot(&intc), before);
}

#[test]
fn test_blocks_of_unconfigured_pins_are_plain_storage() {
    let mut intc = with_pins(2);
    intc.write(en(2), 0x1).unwrap();
    intc.write(st(2), 0).unwrap();
    assert_eq!(intc.read(en(2)).unwrap(), 0x1);
    assert_eq!(intc.read(st(2)).unwrap(), 0);
}
