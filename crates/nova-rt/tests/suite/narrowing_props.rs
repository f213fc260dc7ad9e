use nova_rt::{
    narrow, narrow16, narrow8, narrow_char, round_to_byte, round_to_int, round_to_integral,
    round_to_long, to_int32, IntegralKind,
};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_kind() -> impl Strategy<Value = IntegralKind> {
    prop_oneof![
        Just(IntegralKind::Byte),
        Just(IntegralKind::Short),
        Just(IntegralKind::Char),
        Just(IntegralKind::Int),
        Just(IntegralKind::Long),
    ]
}

#[test]
fn documented_examples() {
    assert_eq!(round_to_byte(257.9), 1);
    assert_eq!(narrow8(257), 1);
    assert_eq!(narrow16(32_768), -32_768);
    assert_eq!(narrow_char(65_537), 1);
    assert_eq!(round_to_long(f64::NAN), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn narrowing_lands_in_range(x in any::<i64>(), kind in arb_kind()) {
        let narrowed = narrow(x, kind);
        prop_assert!(narrowed >= kind.min_value());
        prop_assert!(narrowed <= kind.max_value());
    }

    #[test]
    fn narrowing_is_identity_in_range(x in any::<i64>(), kind in arb_kind()) {
        let clamped = x.clamp(kind.min_value(), kind.max_value());
        prop_assert_eq!(narrow(clamped, kind), clamped);
    }

    #[test]
    fn narrowing_preserves_low_bits(x in any::<i64>(), kind in arb_kind()) {
        let bits = kind.bits();
        let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
        prop_assert_eq!((narrow(x, kind) as u64) & mask, (x as u64) & mask);
    }

    #[test]
    fn rounding_lands_in_range(x in any::<f64>(), kind in arb_kind()) {
        let rounded = round_to_integral(x, kind);
        prop_assert!(rounded >= kind.min_value());
        prop_assert!(rounded <= kind.max_value());
    }

    #[test]
    fn rounding_truncates_in_int_range(x in -2.0e9f64..2.0e9) {
        prop_assert_eq!(i64::from(round_to_int(x)), x.trunc() as i64);
    }

    #[test]
    fn host_int32_matches_wrapping_cast(x in any::<i32>(), frac in 0.0f64..0.99) {
        let shifted = f64::from(x) + if x >= 0 { frac } else { -frac };
        prop_assert_eq!(to_int32(shifted), x);
        prop_assert_eq!(to_int32(f64::from(x) + 4_294_967_296.0), x);
    }
}
