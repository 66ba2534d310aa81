use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use rstest::rstest;
use time::{Date, OffsetDateTime, Time};

use routebind::{LocationCodec, RawParams, ScalarCodec};

fn date_strategy() -> impl Strategy<Value = Date> {
    // Julian day range for years 1 through 9999.
    (1_721_426_i32..=5_373_484).prop_map(|day| Date::from_julian_day(day).unwrap())
}

fn time_strategy() -> impl Strategy<Value = Time> {
    (0_u8..24, 0_u8..60, 0_u8..60, 0_u32..1_000_000_000)
        .prop_map(|(h, m, s, n)| Time::from_hms_nano(h, m, s, n).unwrap())
}

fn query_params_strategy() -> impl Strategy<Value = RawParams> {
    prop::collection::vec(("[a-z][a-z0-9_]{0,7}", ".{1,12}"), 1..8)
        .prop_map(RawParams::from_pairs)
}

proptest! {
    #[test]
    fn proptest_integers_survive_the_wire(value in any::<i64>()) {
        let codec = ScalarCodec::core_seed();
        let wire = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode::<i64>(&wire).unwrap(), value);
    }

    #[test]
    fn proptest_text_is_identity_both_ways(value in any::<String>()) {
        let codec = ScalarCodec::core_seed();
        let wire = codec.encode(&value).unwrap();
        prop_assert_eq!(&wire, &value);
        prop_assert_eq!(codec.decode::<String>(&wire).unwrap(), value);
    }

    #[test]
    fn proptest_dates_survive_the_wire(value in date_strategy()) {
        let codec = ScalarCodec::core_seed();
        let wire = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode::<Date>(&wire).unwrap(), value);
    }

    #[test]
    fn proptest_times_survive_the_wire_to_nanosecond(value in time_strategy()) {
        let codec = ScalarCodec::core_seed();
        let wire = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode::<Time>(&wire).unwrap(), value);
    }

    #[test]
    fn proptest_timestamps_round_trip_pinned_to_utc(
        seconds in 0_u64..4_102_444_800, // through 2099
        nanos in 0_u32..1_000_000_000,
    ) {
        let codec = ScalarCodec::core_seed();
        let value = SystemTime::UNIX_EPOCH + Duration::new(seconds, nanos);
        let wire = codec.encode(&value).unwrap();
        prop_assert!(
            !wire.contains('Z') && !wire.contains('+'),
            "timestamps carry no offset suffix: {}",
            wire
        );
        prop_assert_eq!(codec.decode::<SystemTime>(&wire).unwrap(), value);
    }

    #[test]
    fn proptest_query_strings_reparse_to_the_same_params(params in query_params_strategy()) {
        let codec = LocationCodec::default();
        let query = codec.compose_query(&params);
        prop_assert_eq!(codec.parse_query(&query), params);
    }
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("tRuE", true)]
#[case("false", false)]
#[case("FALSE", false)]
fn boolean_wire_forms_decode(#[case] wire: &str, #[case] expected: bool) {
    let codec = ScalarCodec::core_seed();
    assert_eq!(codec.decode::<bool>(wire).unwrap(), expected);
}

#[rstest]
#[case("2024-03-09T07:45:00Z", 0)]
#[case("2024-03-09T07:45:00+02:00", 7_200)]
#[case("2024-03-09T07:45:00-05:30", -19_800)]
#[case("2024-03-09T07:45+01", 3_600)]
fn offset_wire_forms_decode(#[case] wire: &str, #[case] offset_seconds: i32) {
    let codec = ScalarCodec::core_seed();
    let value = codec.decode::<OffsetDateTime>(wire).unwrap();
    assert_eq!(value.offset().whole_seconds(), offset_seconds);
}

#[rstest]
#[case::sign_inside_field("2024-03-09T07:45--128")]
#[case::plus_inside_field("2024-03-09T07:45+1:-30")]
#[case::oversized_field("2024-03-09T07:45+999")]
#[case::no_offset("2024-03-09T07:45")]
fn malformed_offset_wire_forms_decode_to_errors(#[case] wire: &str) {
    let codec = ScalarCodec::core_seed();
    assert!(codec.decode::<OffsetDateTime>(wire).is_err());
}

#[rstest]
#[case::i8_min("-128", i8::MIN)]
#[case::i8_max("127", i8::MAX)]
fn integer_width_bounds_decode(#[case] wire: &str, #[case] expected: i8) {
    let codec = ScalarCodec::core_seed();
    assert_eq!(codec.decode::<i8>(wire).unwrap(), expected);
}

#[rstest]
#[case("128")]
#[case("-129")]
#[case("1.5")]
#[case("0x10")]
fn out_of_range_integers_are_rejected(#[case] wire: &str) {
    let codec = ScalarCodec::core_seed();
    assert!(codec.decode::<i8>(wire).is_err());
}

#[rstest]
#[case("07:45", "07:45:00")]
#[case("07:45:30", "07:45:30")]
#[case("07:45:30.500", "07:45:30.5")]
#[case("07:45:30.000000001", "07:45:30.000000001")]
fn time_wire_forms_canonicalize(#[case] wire: &str, #[case] canonical: &str) {
    let codec = ScalarCodec::core_seed();
    let value = codec.decode::<Time>(wire).unwrap();
    assert_eq!(codec.encode(&value).unwrap(), canonical);
}
