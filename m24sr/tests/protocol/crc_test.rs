use m24sr::protocol::crc;
use proptest::prelude::*;

#[test]
fn check_value_and_templates() {
    assert_eq!(crc::compute(b"123456789"), 0xBF05);
    assert_eq!(crc::compute(&[0xC2]).to_le_bytes(), [0xE0, 0xB4]);
    assert_eq!(crc::compute(&[]), 0x6363);
}

proptest! {
    #[test]
    fn appended_crc_leaves_zero_residue(payload in proptest::collection::vec(any::<u8>(), 0..253)) {
        let mut f = payload.clone();
        crc::append(&mut f);
        prop_assert_eq!(f.len(), payload.len() + 2);
        prop_assert_eq!(crc::residue(&f), 0);
        prop_assert!(crc::is_intact(&f));
    }

    #[test]
    fn any_single_byte_change_is_detected(
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        idx in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut f = payload;
        crc::append(&mut f);
        let i = idx.index(f.len());
        f[i] ^= flip;
        prop_assert_ne!(crc::residue(&f), 0);
    }
}
