//! Public parsing surface: classification, unit capture, width cascade.
//!
//! A token is classified in a single pass (decimal, hex-mode, or numeric
//! prefix plus unit suffix), converted at the widest width for the requested
//! signedness, then range-checked down to the target width. Narrow-width
//! failures still produce a deterministic output: the error carries the
//! violated bound as `clamped`, so best-effort callers that ignore the
//! failure flag get saturation instead of garbage.
//!
//! Unit-vs-hex precedence: with a category requested, the numeric prefix is
//! the maximal leading decimal run and the remainder must exact-match the
//! whitelist (an empty remainder means no unit was given). Only when that
//! split fails is the whole token considered for hex mode, and then nothing
//! but an optional trailing `h`/`H` marker may remain after conversion. So
//! `"3h"` under [`UnitCategory::Time`] is three hours, while `"3h"` under
//! [`UnitCategory::None`] is hex 0x3.

use thiserror::Error;

use super::conversion::{self, Base, Status};
use super::units::UnitCategory;
use crate::errno::{self, ErrorKind, FailureKind};

/// A successful parse: the converted value plus the captured unit.
///
/// `unit` is the canonical whitelist entry that matched, or `None` when the
/// token carried no suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub unit: Option<&'static str>,
}

/// Conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConversionError<T> {
    /// The token is not a number in any accepted base.
    #[error("token is not numeric")]
    NotNumeric,
    /// The converted value falls outside the target type's range.
    ///
    /// `clamped` is the violated bound, written deliberately so callers
    /// relying on saturation semantics still get a defined value.
    #[error("value out of range, clamped to {clamped}")]
    OutOfRange { clamped: T },
    /// The remainder after the numeric prefix is not on the category's
    /// whitelist.
    #[error("unrecognized unit suffix")]
    UnknownUnit,
}

impl<T> FailureKind for ConversionError<T> {
    fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::OutOfRange { .. } => ErrorKind::Range,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// How the classifier decided to read a sign-stripped token.
struct Plan<'t> {
    /// Bytes handed to the conversion engine.
    digits: &'t str,
    base: Base,
    /// Unit captured by the decimal-first split.
    unit: Option<&'static str>,
}

/// Strips at most one leading sign.
fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    }
}

/// Single-pass classification of `body` against `category`.
fn plan_token<T>(body: &str, category: UnitCategory) -> Result<Plan<'_>, ConversionError<T>> {
    let bytes = body.as_bytes();
    if bytes.is_empty() {
        return Err(ConversionError::NotNumeric);
    }

    if bytes.iter().all(u8::is_ascii_digit) {
        return Ok(Plan { digits: body, base: Base::Decimal, unit: None });
    }

    if category != UnitCategory::None {
        let split = bytes
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(bytes.len());
        if split > 0 {
            if let Some(unit) = category.match_suffix(&body[split..]) {
                return Ok(Plan {
                    digits: &body[..split],
                    base: Base::Decimal,
                    unit: Some(unit),
                });
            }
        }
    }

    // The x/h markers are non-numeric punctuation, but their presence among
    // otherwise-hex bytes forces hex-mode selection.
    let hex_shaped = bytes
        .iter()
        .all(|&b| b.is_ascii_hexdigit() || matches!(b, b'x' | b'X' | b'h' | b'H'));
    if hex_shaped {
        return Ok(Plan { digits: body, base: Base::Hex, unit: None });
    }

    Err(if category == UnitCategory::None {
        ConversionError::NotNumeric
    } else {
        ConversionError::UnknownUnit
    })
}

/// Validates the bytes the engine left unconsumed. Hex mode may leave one
/// trailing `h`/`H` marker; anything else is a failure.
fn check_remainder<T>(
    digits: &str,
    consumed: usize,
    base: Base,
    category: UnitCategory,
) -> Result<(), ConversionError<T>> {
    if consumed == 0 {
        return Err(ConversionError::NotNumeric);
    }
    let mut rest = &digits.as_bytes()[consumed..];
    if base == Base::Hex && matches!(rest.first(), Some(b'h' | b'H')) {
        rest = &rest[1..];
    }
    if rest.is_empty() {
        Ok(())
    } else if category == UnitCategory::None {
        Err(ConversionError::NotNumeric)
    } else {
        Err(ConversionError::UnknownUnit)
    }
}

/// Wide unsigned parse shared by the whole unsigned cascade.
fn parse_u64_token(text: &str, category: UnitCategory) -> Result<Parsed<u64>, ConversionError<u64>> {
    let (negative, body) = split_sign(text);
    if negative {
        // The C engines wrap a leading '-' into two's complement on
        // unsigned conversions; that is exactly the footgun this layer
        // removes.
        return Err(ConversionError::NotNumeric);
    }
    let plan = plan_token(body, category)?;
    let (value, consumed, status) = conversion::convert_u64(plan.digits.as_bytes(), plan.base);
    check_remainder(plan.digits, consumed, plan.base, category)?;
    if status != Status::Ok {
        return Err(ConversionError::OutOfRange { clamped: u64::MAX });
    }
    Ok(Parsed { value, unit: plan.unit })
}

/// Wide signed parse shared by the whole signed cascade.
fn parse_i64_token(text: &str, category: UnitCategory) -> Result<Parsed<i64>, ConversionError<i64>> {
    let (negative, body) = split_sign(text);
    let plan = plan_token(body, category)?;
    let (value, consumed, status) =
        conversion::convert_i64(plan.digits.as_bytes(), plan.base, negative);
    check_remainder(plan.digits, consumed, plan.base, category)?;
    match status {
        Status::Ok => Ok(Parsed { value, unit: plan.unit }),
        Status::Overflow => Err(ConversionError::OutOfRange { clamped: i64::MAX }),
        Status::Underflow => Err(ConversionError::OutOfRange { clamped: i64::MIN }),
    }
}

macro_rules! unsigned_parser {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(
            text: &str,
            category: UnitCategory,
        ) -> Result<Parsed<$ty>, ConversionError<$ty>> {
            errno::observe(match parse_u64_token(text, category) {
                Ok(wide) if wide.value > <$ty>::MAX as u64 => {
                    Err(ConversionError::OutOfRange { clamped: <$ty>::MAX })
                }
                Ok(wide) => Ok(Parsed { value: wide.value as $ty, unit: wide.unit }),
                Err(ConversionError::OutOfRange { .. }) => {
                    Err(ConversionError::OutOfRange { clamped: <$ty>::MAX })
                }
                Err(ConversionError::NotNumeric) => Err(ConversionError::NotNumeric),
                Err(ConversionError::UnknownUnit) => Err(ConversionError::UnknownUnit),
            })
        }
    };
}

macro_rules! signed_parser {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(
            text: &str,
            category: UnitCategory,
        ) -> Result<Parsed<$ty>, ConversionError<$ty>> {
            errno::observe(match parse_i64_token(text, category) {
                Ok(wide) if wide.value > <$ty>::MAX as i64 => {
                    Err(ConversionError::OutOfRange { clamped: <$ty>::MAX })
                }
                Ok(wide) if wide.value < <$ty>::MIN as i64 => {
                    Err(ConversionError::OutOfRange { clamped: <$ty>::MIN })
                }
                Ok(wide) => Ok(Parsed { value: wide.value as $ty, unit: wide.unit }),
                Err(ConversionError::OutOfRange { clamped }) => {
                    Err(ConversionError::OutOfRange {
                        clamped: if clamped < 0 { <$ty>::MIN } else { <$ty>::MAX },
                    })
                }
                Err(ConversionError::NotNumeric) => Err(ConversionError::NotNumeric),
                Err(ConversionError::UnknownUnit) => Err(ConversionError::UnknownUnit),
            })
        }
    };
}

macro_rules! float_parser {
    ($(#[$doc:meta])* $name:ident, $inner:ident, $ty:ty) => {
        fn $inner(
            text: &str,
            category: UnitCategory,
        ) -> Result<Parsed<$ty>, ConversionError<$ty>> {
            let consumed = conversion::float_prefix_len(text.as_bytes());
            if consumed == 0 {
                return Err(ConversionError::NotNumeric);
            }
            let value: $ty = text[..consumed]
                .parse()
                .map_err(|_| ConversionError::NotNumeric)?;
            let rest = &text[consumed..];
            let unit = if rest.is_empty() {
                None
            } else if category == UnitCategory::None {
                return Err(ConversionError::NotNumeric);
            } else {
                Some(category.match_suffix(rest).ok_or(ConversionError::UnknownUnit)?)
            };
            // A finite-looking token that converts to an infinity overflowed
            // the type; the signed infinity is the deterministic fallback.
            if value.is_infinite() {
                return Err(ConversionError::OutOfRange { clamped: value });
            }
            Ok(Parsed { value, unit })
        }

        $(#[$doc])*
        pub fn $name(
            text: &str,
            category: UnitCategory,
        ) -> Result<Parsed<$ty>, ConversionError<$ty>> {
            errno::observe($inner(text, category))
        }
    };
}

unsigned_parser!(
    /// Parses `text` as a `u8`, clamping range failures to the violated bound.
    parse_u8, u8
);
unsigned_parser!(
    /// Parses `text` as a `u16`, clamping range failures to the violated bound.
    parse_u16, u16
);
unsigned_parser!(
    /// Parses `text` as a `u32`, clamping range failures to the violated bound.
    parse_u32, u32
);
unsigned_parser!(
    /// Parses `text` as a `u64`. This is the wide engine the narrower
    /// unsigned widths cascade through.
    parse_u64, u64
);

signed_parser!(
    /// Parses `text` as an `i8`, clamping range failures to the violated bound.
    parse_i8, i8
);
signed_parser!(
    /// Parses `text` as an `i16`, clamping range failures to the violated bound.
    parse_i16, i16
);
signed_parser!(
    /// Parses `text` as an `i32`, clamping range failures to the violated bound.
    parse_i32, i32
);
signed_parser!(
    /// Parses `text` as an `i64`. This is the wide engine the narrower
    /// signed widths cascade through.
    parse_i64, i64
);

float_parser!(
    /// Parses `text` as an `f32` at native single precision (no cascade).
    parse_f32, parse_f32_token, f32
);
float_parser!(
    /// Parses `text` as an `f64` at native double precision.
    parse_f64, parse_f64_token, f64
);
