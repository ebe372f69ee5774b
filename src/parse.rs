//! Lexical conversion of single header values into primitives.
//!
//! Integers and floats are always parsed at 64-bit width first and then
//! narrowed to the field's declared width according to [`Narrowing`].

use crate::error::{ParseError, ParseKind};

/// Policy for fitting a parsed 64-bit number into a narrower field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Narrowing {
    /// Values that do not fit the declared width fail with
    /// [`ParseError::OutOfRange`].
    #[default]
    Checked,
    /// Values are cast with `as`: integers wrap, floats round (possibly to
    /// infinity).
    Truncate,
}

/// Parses a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(input: &str) -> Result<bool, ParseError> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::Bool {
            input: input.to_string(),
        }),
    }
}

/// Parses a base-10 signed 64-bit integer.
pub fn parse_i64(input: &str) -> Result<i64, ParseError> {
    input.parse::<i64>().map_err(|source| ParseError::Int {
        input: input.to_string(),
        source,
    })
}

/// Parses a base-10 unsigned 64-bit integer.
pub fn parse_u64(input: &str) -> Result<u64, ParseError> {
    input.parse::<u64>().map_err(|source| ParseError::Uint {
        input: input.to_string(),
        source,
    })
}

/// Parses a 64-bit float.
///
/// A finite literal too large for `f64` is [`ParseError::OutOfRange`] rather
/// than infinity. `inf` and `infinity` are still accepted as written.
pub fn parse_f64(input: &str) -> Result<f64, ParseError> {
    parse_float(input, "f64")
}

fn parse_float(input: &str, target: &'static str) -> Result<f64, ParseError> {
    let value = input.parse::<f64>().map_err(|source| ParseError::Float {
        input: input.to_string(),
        source,
    })?;
    if value.is_infinite() && !is_infinity_literal(input) {
        return Err(ParseError::OutOfRange {
            kind: ParseKind::Float,
            input: input.to_string(),
            target,
        });
    }
    Ok(value)
}

fn is_infinity_literal(input: &str) -> bool {
    let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Integer widths a header value can be narrowed into.
///
/// Implemented for every built-in integer type. `Wide` is the 64-bit type the
/// value is parsed as before narrowing.
pub trait NarrowInt: Copy {
    /// The 64-bit type parsed before narrowing
    type Wide: Copy;

    /// Numeric family reported in errors
    const KIND: ParseKind;

    /// Parses the value at full width.
    fn parse_wide(input: &str) -> Result<Self::Wide, ParseError>;

    /// Range-checked conversion from the wide value.
    fn try_narrow(wide: Self::Wide) -> Option<Self>;

    /// Wrapping conversion from the wide value.
    fn truncate(wide: Self::Wide) -> Self;
}

macro_rules! narrow_int {
    ($kind:ident, $wide:ty, $parse:ident => $($ty:ty),+) => {
        $(
            impl NarrowInt for $ty {
                type Wide = $wide;
                const KIND: ParseKind = ParseKind::$kind;

                fn parse_wide(input: &str) -> Result<$wide, ParseError> {
                    $parse(input)
                }

                fn try_narrow(wide: $wide) -> Option<Self> {
                    <$ty>::try_from(wide).ok()
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn truncate(wide: $wide) -> Self {
                    wide as $ty
                }
            }
        )+
    };
}

narrow_int!(Int, i64, parse_i64 => i8, i16, i32, i64, isize);
narrow_int!(Uint, u64, parse_u64 => u8, u16, u32, u64, usize);

/// Parses `input` and narrows it to `T` under `narrowing`.
pub fn parse_int<T: NarrowInt>(input: &str, narrowing: Narrowing) -> Result<T, ParseError> {
    let wide = T::parse_wide(input)?;
    match narrowing {
        Narrowing::Truncate => Ok(T::truncate(wide)),
        Narrowing::Checked => T::try_narrow(wide).ok_or_else(|| ParseError::OutOfRange {
            kind: T::KIND,
            input: input.to_string(),
            target: std::any::type_name::<T>(),
        }),
    }
}

/// Parses `input` as `f64` and narrows it to `f32` under `narrowing`.
///
/// Under [`Narrowing::Checked`] a finite value that overflows to infinity is
/// rejected; precision loss from rounding is not. Values beyond the `f64`
/// range are rejected under either policy.
pub fn parse_f32(input: &str, narrowing: Narrowing) -> Result<f32, ParseError> {
    let wide = parse_float(input, "f32")?;
    #[allow(clippy::cast_possible_truncation)]
    let narrow = wide as f32;
    if narrowing == Narrowing::Checked && wide.is_finite() && narrow.is_infinite() {
        return Err(ParseError::OutOfRange {
            kind: ParseKind::Float,
            input: input.to_string(),
            target: "f32",
        });
    }
    Ok(narrow)
}
