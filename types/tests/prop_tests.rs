use proptest::prelude::*;

use workid_types::{Address, Amount, Timestamp, WID_UNIT};

proptest! {
    /// Address textual roundtrip: display then parse produces the same address.
    #[test]
    fn address_text_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        prop_assert_eq!(Address::parse(&addr.to_string()).unwrap(), addr);
    }

    /// Address::is_zero is true only for all-zero bytes.
    #[test]
    fn address_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(Address::new(bytes).is_zero(), bytes == [0u8; 20]);
    }

    /// Amount decimal rendering parses back to the same raw value.
    #[test]
    fn amount_display_parse_roundtrip(raw in 0u128..u128::MAX / 2) {
        let amount = Amount::new(raw);
        prop_assert_eq!(Amount::parse(&amount.to_string()).unwrap(), amount);
    }

    /// A basis-point multiplier never exceeds the original amount for bps <= 10_000.
    #[test]
    fn bps_never_inflates(raw in 0u128..u128::MAX / 10_000, bps in 0u32..=10_000) {
        let amount = Amount::new(raw);
        let scaled = amount.checked_mul_bps(bps).unwrap();
        prop_assert!(scaled <= amount);
    }

    /// Whole-unit amounts scale exactly by every tier multiplier.
    #[test]
    fn bps_exact_on_whole_units(units in 0u64..1_000_000_000) {
        let amount = Amount::from_units(units);
        for bps in [1_000u32, 2_000, 6_000, 10_000] {
            let scaled = amount.checked_mul_bps(bps).unwrap();
            prop_assert_eq!(scaled.raw(), units as u128 * WID_UNIT * bps as u128 / 10_000);
            prop_assert_eq!(scaled.raw() * 10_000, amount.raw() * bps as u128);
        }
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp bincode serialization roundtrip.
    #[test]
    fn timestamp_bincode_roundtrip(secs in 0u64..u64::MAX) {
        let ts = Timestamp::new(secs);
        let encoded = bincode::serialize(&ts).unwrap();
        let decoded: Timestamp = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, ts);
    }
}
