//! Width/signedness contract matrix for the parsing cascade.
//!
//! For every integer width: the decimal text of MAX parses to exactly MAX,
//! MAX+1 fails with the output clamped to MAX, and (signed) the symmetric
//! property holds at MIN.

use hardlibc_core::errno;
use hardlibc_core::stdlib::parse::{
    ConversionError, parse_i8, parse_i16, parse_i32, parse_i64, parse_u8, parse_u16, parse_u32,
    parse_u64,
};
use hardlibc_core::stdlib::units::UnitCategory;

macro_rules! unsigned_matrix_case {
    ($parse:ident, $ty:ty) => {
        let max_text = <$ty>::MAX.to_string();
        let parsed = $parse(&max_text, UnitCategory::None).unwrap();
        assert_eq!(parsed.value, <$ty>::MAX, "{}({max_text})", stringify!($parse));

        let over_text = (<$ty>::MAX as u128 + 1).to_string();
        assert_eq!(
            $parse(&over_text, UnitCategory::None),
            Err(ConversionError::OutOfRange { clamped: <$ty>::MAX }),
            "{}({over_text})",
            stringify!($parse)
        );
        assert_eq!(errno::get_errno(), errno::ERANGE);
    };
}

macro_rules! signed_matrix_case {
    ($parse:ident, $ty:ty) => {
        let max_text = <$ty>::MAX.to_string();
        assert_eq!($parse(&max_text, UnitCategory::None).unwrap().value, <$ty>::MAX);

        let over_text = (<$ty>::MAX as i128 + 1).to_string();
        assert_eq!(
            $parse(&over_text, UnitCategory::None),
            Err(ConversionError::OutOfRange { clamped: <$ty>::MAX })
        );

        let min_text = <$ty>::MIN.to_string();
        assert_eq!($parse(&min_text, UnitCategory::None).unwrap().value, <$ty>::MIN);

        let under_text = (<$ty>::MIN as i128 - 1).to_string();
        assert_eq!(
            $parse(&under_text, UnitCategory::None),
            Err(ConversionError::OutOfRange { clamped: <$ty>::MIN })
        );
        assert_eq!(errno::get_errno(), errno::ERANGE);
    };
}

#[test]
fn unsigned_widths_saturate_at_max() {
    unsigned_matrix_case!(parse_u8, u8);
    unsigned_matrix_case!(parse_u16, u16);
    unsigned_matrix_case!(parse_u32, u32);
    unsigned_matrix_case!(parse_u64, u64);
}

#[test]
fn signed_widths_saturate_at_both_bounds() {
    signed_matrix_case!(parse_i8, i8);
    signed_matrix_case!(parse_i16, i16);
    signed_matrix_case!(parse_i32, i32);
    signed_matrix_case!(parse_i64, i64);
}

#[test]
fn hex_and_decimal_spellings_agree_across_widths() {
    assert_eq!(parse_u8("0x1A", UnitCategory::None).unwrap().value, 26);
    assert_eq!(parse_u16("0x1A", UnitCategory::None).unwrap().value, 26);
    assert_eq!(parse_u32("26", UnitCategory::None).unwrap().value, 26);
    assert_eq!(parse_i64("0x1A", UnitCategory::None).unwrap().value, 26);
}

#[test]
fn unit_suffixes_flow_through_the_cascade() {
    let parsed = parse_u16("64KB", UnitCategory::DataSize).unwrap();
    assert_eq!((parsed.value, parsed.unit), (64, Some("KB")));

    // Range checking still applies to the numeric prefix.
    assert_eq!(
        parse_u8("300KiB", UnitCategory::DataSize),
        Err(ConversionError::OutOfRange { clamped: 255 })
    );
}

#[test]
fn each_call_is_a_pure_function_of_its_inputs() {
    for _ in 0..3 {
        assert_eq!(parse_u32("0x1A", UnitCategory::None).unwrap().value, 26);
        assert_eq!(
            parse_u8("256", UnitCategory::None),
            Err(ConversionError::OutOfRange { clamped: 255 })
        );
    }
}
