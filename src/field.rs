//! Field types the binder can write into.
//!
//! A record field is reachable by the binder through [`HeaderField`], which
//! hands out a [`FieldSlot`]: a type tag together with a mutable handle to the
//! field. The binder dispatches on the slot, never on the concrete type.
//!
//! Custom types opt in through [`UnmarshalHeader`]; every such type is a
//! `HeaderField` whose slot is [`FieldSlot::Custom`]. Because Rust selects a
//! single `HeaderField` implementation per type, a custom type is always
//! parsed by its own hook, even when it wraps a type with a built-in
//! conversion.

use std::collections::{BTreeMap, HashMap};

use crate::error::{BindError, BoxError, ParseError};
use crate::parse::{self, Narrowing};

/// Capability for a field type to parse itself from a header's full value
/// sequence.
///
/// The hook receives every value stored under the field's key, in order, and
/// is solely responsible for updating `self`. Its error aborts the bind and is
/// returned unchanged as [`BindError::Custom`].
///
/// # Examples
///
/// ```
/// use header_bind::{BoxError, UnmarshalHeader};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Ports(Vec<u16>);
///
/// impl UnmarshalHeader for Ports {
///     fn unmarshal_header(&mut self, values: &[&str]) -> Result<(), BoxError> {
///         for value in values {
///             self.0.push(value.parse()?);
///         }
///         Ok(())
///     }
/// }
///
/// let mut ports = Ports::default();
/// ports.unmarshal_header(&["80", "443"]).unwrap();
/// assert_eq!(ports, Ports(vec![80, 443]));
/// ```
pub trait UnmarshalHeader {
    /// Populates `self` from the ordered, non-empty values of its key.
    fn unmarshal_header(&mut self, values: &[&str]) -> Result<(), BoxError>;
}

/// A type that can be the target of a header binding.
///
/// Implemented for `bool`, all integer and float widths, `String`,
/// `Vec<String>`, and every [`UnmarshalHeader`] type. Fixed-size arrays, maps
/// and `()` implement it with [`FieldSlot::Unsupported`], so binding a
/// matching key into them fails at runtime with
/// [`BindError::UnsupportedType`]. Any other type is rejected at compile time.
pub trait HeaderField {
    /// Returns the slot the binder writes through.
    fn header_slot(&mut self) -> FieldSlot<'_>;
}

/// Type tag plus mutable handle for one record field.
pub enum FieldSlot<'a> {
    /// A `bool` field
    Bool(&'a mut bool),
    /// A signed integer field of any width
    Int(IntSlot<'a>),
    /// An unsigned integer field of any width
    Uint(UintSlot<'a>),
    /// A floating point field of any width
    Float(FloatSlot<'a>),
    /// A `String` field, set from the first value
    Str(&'a mut String),
    /// A `Vec<String>` field, set from all values
    Strings(&'a mut Vec<String>),
    /// A field that parses itself
    Custom {
        /// Rust type name of the field
        type_name: &'static str,
        /// The field's own parser
        hook: &'a mut dyn UnmarshalHeader,
    },
    /// A field type with no conversion
    Unsupported {
        /// Rust type name of the field
        type_name: &'static str,
    },
}

/// Signed integer slot, one variant per width.
#[allow(missing_docs)]
pub enum IntSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
}

/// Unsigned integer slot, one variant per width.
#[allow(missing_docs)]
pub enum UintSlot<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
}

/// Floating point slot, one variant per width.
#[allow(missing_docs)]
pub enum FloatSlot<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FieldSlot<'_> {
    /// Short name of the slot's declared type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldSlot::Bool(_) => "bool",
            FieldSlot::Int(slot) => match slot {
                IntSlot::I8(_) => "i8",
                IntSlot::I16(_) => "i16",
                IntSlot::I32(_) => "i32",
                IntSlot::I64(_) => "i64",
                IntSlot::Isize(_) => "isize",
            },
            FieldSlot::Uint(slot) => match slot {
                UintSlot::U8(_) => "u8",
                UintSlot::U16(_) => "u16",
                UintSlot::U32(_) => "u32",
                UintSlot::U64(_) => "u64",
                UintSlot::Usize(_) => "usize",
            },
            FieldSlot::Float(FloatSlot::F32(_)) => "f32",
            FieldSlot::Float(FloatSlot::F64(_)) => "f64",
            FieldSlot::Str(_) => "String",
            FieldSlot::Strings(_) => "Vec<String>",
            FieldSlot::Custom { type_name, .. } | FieldSlot::Unsupported { type_name } => {
                *type_name
            }
        }
    }

    /// Converts `values` and writes the result into the field.
    ///
    /// Custom slots receive every value; `Strings` takes them all in order;
    /// every other slot reads only the first value. An empty `values` leaves
    /// built-in slots untouched.
    pub(crate) fn assign(
        self,
        field: &'static str,
        values: &[&str],
        narrowing: Narrowing,
    ) -> Result<(), BindError> {
        match self {
            FieldSlot::Custom { hook, .. } => {
                hook.unmarshal_header(values).map_err(BindError::Custom)
            }
            FieldSlot::Unsupported { type_name } => {
                Err(BindError::UnsupportedType { field, type_name })
            }
            FieldSlot::Strings(out) => {
                *out = values.iter().map(|value| (*value).to_owned()).collect();
                Ok(())
            }
            FieldSlot::Bool(out) => first_value(field, values, |input| {
                *out = parse::parse_bool(input)?;
                Ok(())
            }),
            FieldSlot::Int(slot) => {
                first_value(field, values, |input| slot.assign(input, narrowing))
            }
            FieldSlot::Uint(slot) => {
                first_value(field, values, |input| slot.assign(input, narrowing))
            }
            FieldSlot::Float(slot) => {
                first_value(field, values, |input| slot.assign(input, narrowing))
            }
            FieldSlot::Str(out) => first_value(field, values, |input| {
                *out = input.to_owned();
                Ok(())
            }),
        }
    }
}

fn first_value(
    field: &'static str,
    values: &[&str],
    set: impl FnOnce(&str) -> Result<(), ParseError>,
) -> Result<(), BindError> {
    match values.first() {
        Some(first) => set(first).map_err(|source| BindError::Parse { field, source }),
        None => Ok(()),
    }
}

impl IntSlot<'_> {
    fn assign(self, input: &str, narrowing: Narrowing) -> Result<(), ParseError> {
        match self {
            IntSlot::I8(out) => *out = parse::parse_int(input, narrowing)?,
            IntSlot::I16(out) => *out = parse::parse_int(input, narrowing)?,
            IntSlot::I32(out) => *out = parse::parse_int(input, narrowing)?,
            IntSlot::I64(out) => *out = parse::parse_int(input, narrowing)?,
            IntSlot::Isize(out) => *out = parse::parse_int(input, narrowing)?,
        }
        Ok(())
    }
}

impl UintSlot<'_> {
    fn assign(self, input: &str, narrowing: Narrowing) -> Result<(), ParseError> {
        match self {
            UintSlot::U8(out) => *out = parse::parse_int(input, narrowing)?,
            UintSlot::U16(out) => *out = parse::parse_int(input, narrowing)?,
            UintSlot::U32(out) => *out = parse::parse_int(input, narrowing)?,
            UintSlot::U64(out) => *out = parse::parse_int(input, narrowing)?,
            UintSlot::Usize(out) => *out = parse::parse_int(input, narrowing)?,
        }
        Ok(())
    }
}

impl FloatSlot<'_> {
    fn assign(self, input: &str, narrowing: Narrowing) -> Result<(), ParseError> {
        match self {
            FloatSlot::F32(out) => *out = parse::parse_f32(input, narrowing)?,
            FloatSlot::F64(out) => *out = parse::parse_f64(input)?,
        }
        Ok(())
    }
}

macro_rules! header_field {
    ($($ty:ty => $outer:ident, $slot:ident :: $variant:ident),+ $(,)?) => {
        $(
            impl HeaderField for $ty {
                fn header_slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::$outer($slot::$variant(self))
                }
            }
        )+
    };
}

header_field! {
    i8 => Int, IntSlot::I8,
    i16 => Int, IntSlot::I16,
    i32 => Int, IntSlot::I32,
    i64 => Int, IntSlot::I64,
    isize => Int, IntSlot::Isize,
    u8 => Uint, UintSlot::U8,
    u16 => Uint, UintSlot::U16,
    u32 => Uint, UintSlot::U32,
    u64 => Uint, UintSlot::U64,
    usize => Uint, UintSlot::Usize,
    f32 => Float, FloatSlot::F32,
    f64 => Float, FloatSlot::F64,
}

impl HeaderField for bool {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Bool(self)
    }
}

impl HeaderField for String {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Str(self)
    }
}

impl HeaderField for Vec<String> {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Strings(self)
    }
}

impl<T: UnmarshalHeader> HeaderField for T {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Custom {
            type_name: std::any::type_name::<T>(),
            hook: self,
        }
    }
}

impl<T, const N: usize> HeaderField for [T; N] {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        unsupported::<Self>()
    }
}

impl<K, V, S> HeaderField for HashMap<K, V, S> {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        unsupported::<Self>()
    }
}

impl<K, V> HeaderField for BTreeMap<K, V> {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        unsupported::<Self>()
    }
}

impl HeaderField for () {
    fn header_slot(&mut self) -> FieldSlot<'_> {
        unsupported::<Self>()
    }
}

fn unsupported<'a, T: ?Sized>() -> FieldSlot<'a> {
    FieldSlot::Unsupported {
        type_name: std::any::type_name::<T>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseKind;

    #[derive(Debug, Default, PartialEq)]
    struct Csv(Vec<String>);

    impl UnmarshalHeader for Csv {
        fn unmarshal_header(&mut self, values: &[&str]) -> Result<(), BoxError> {
            for value in values {
                self.0
                    .extend(value.split(',').map(|part| part.trim().to_string()));
            }
            Ok(())
        }
    }

    struct AlwaysFails;

    impl UnmarshalHeader for AlwaysFails {
        fn unmarshal_header(&mut self, _values: &[&str]) -> Result<(), BoxError> {
            Err("rejected".into())
        }
    }

    fn assign<T: HeaderField>(target: &mut T, values: &[&str]) -> Result<(), BindError> {
        target
            .header_slot()
            .assign("target", values, Narrowing::Checked)
    }

    #[test]
    fn slot_type_names() {
        assert_eq!(true.header_slot().type_name(), "bool");
        assert_eq!(0_i16.header_slot().type_name(), "i16");
        assert_eq!(0_usize.header_slot().type_name(), "usize");
        assert_eq!(0.0_f32.header_slot().type_name(), "f32");
        assert_eq!(String::new().header_slot().type_name(), "String");
        assert_eq!(Vec::<String>::new().header_slot().type_name(), "Vec<String>");
        assert!(Csv::default().header_slot().type_name().ends_with("tests::Csv"));
        assert_eq!([0_u8; 3].header_slot().type_name(), "[u8; 3]");
    }

    #[test]
    fn scalar_slots_read_first_value_only() {
        let mut value = 0_i32;
        assign(&mut value, &["-4", "99"]).unwrap();
        assert_eq!(value, -4);

        let mut text = String::new();
        assign(&mut text, &["first", "second"]).unwrap();
        assert_eq!(text, "first");
    }

    #[test]
    fn strings_slot_takes_every_value_in_order() {
        let mut values = vec!["stale".to_string()];
        assign(&mut values, &["some", "slice"]).unwrap();
        assert_eq!(values, vec!["some".to_string(), "slice".to_string()]);
    }

    #[test]
    fn custom_slot_receives_full_sequence() {
        let mut csv = Csv::default();
        assign(&mut csv, &["a, b", "c"]).unwrap();
        assert_eq!(csv, Csv(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn custom_slot_error_is_passed_through() {
        let err = assign(&mut AlwaysFails, &["x"]).unwrap_err();
        match err {
            BindError::Custom(inner) => assert_eq!(inner.to_string(), "rejected"),
            other => panic!("expected custom error, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_slot_leaves_field_untouched() {
        let mut bytes = [1_u8, 2, 3];
        let err = assign(&mut bytes, &["xxx"]).unwrap_err();

        assert!(matches!(
            err,
            BindError::UnsupportedType {
                field: "target",
                type_name: "[u8; 3]"
            }
        ));
        assert_eq!(bytes, [1, 2, 3]);
    }

    #[test]
    fn maps_and_unit_are_unsupported() {
        let mut map: HashMap<String, String> = HashMap::new();
        assert!(matches!(
            assign(&mut map, &["k"]),
            Err(BindError::UnsupportedType { .. })
        ));

        let mut tree: BTreeMap<String, String> = BTreeMap::new();
        assert!(matches!(
            assign(&mut tree, &["k"]),
            Err(BindError::UnsupportedType { .. })
        ));

        assert!(matches!(
            assign(&mut (), &["k"]),
            Err(BindError::UnsupportedType { type_name: "()", .. })
        ));
    }

    #[test]
    fn parse_failure_keeps_previous_value() {
        let mut flag = true;
        let err = assign(&mut flag, &["bad"]).unwrap_err();

        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Bool {
                input: "bad".to_string()
            })
        );
        assert!(flag);
    }

    #[test]
    fn float_widths() {
        let mut narrow = 0.0_f32;
        let mut wide = 0.0_f64;
        assign(&mut narrow, &["0.123"]).unwrap();
        assign(&mut wide, &["1.234"]).unwrap();

        assert_eq!(narrow, 0.123_f64 as f32);
        assert_eq!(wide, 1.234);
    }

    #[test]
    fn every_numeric_width_binds() {
        let (mut a, mut b, mut c, mut d, mut e) = (0_i8, 0_i16, 0_i32, 0_i64, 0_isize);
        assign(&mut a, &["-8"]).unwrap();
        assign(&mut b, &["-16"]).unwrap();
        assign(&mut c, &["-32"]).unwrap();
        assign(&mut d, &["-64"]).unwrap();
        assign(&mut e, &["-1"]).unwrap();
        assert_eq!((a, b, c, d, e), (-8, -16, -32, -64, -1));

        let (mut a, mut b, mut c, mut d, mut e) = (0_u8, 0_u16, 0_u32, 0_u64, 0_usize);
        assign(&mut a, &["8"]).unwrap();
        assign(&mut b, &["16"]).unwrap();
        assign(&mut c, &["32"]).unwrap();
        assign(&mut d, &["64"]).unwrap();
        assign(&mut e, &["1"]).unwrap();
        assert_eq!((a, b, c, d, e), (8, 16, 32, 64, 1));
    }

    #[test]
    fn float_overflow_keeps_previous_value() {
        let mut wide = 1.5_f64;
        let err = assign(&mut wide, &["1e400"]).unwrap_err();

        assert!(matches!(
            err.parse_error(),
            Some(ParseError::OutOfRange {
                kind: ParseKind::Float,
                target: "f64",
                ..
            })
        ));
        assert_eq!(wide, 1.5);
    }

    #[test]
    fn uint_rejects_negative_input() {
        let mut count = 7_u32;
        let err = assign(&mut count, &["-1"]).unwrap_err();

        assert_eq!(err.parse_error().map(ParseError::kind), Some(ParseKind::Uint));
        assert_eq!(count, 7);
    }

    #[test]
    fn empty_values_leave_scalar_untouched() {
        let mut value = 5_u64;
        assign(&mut value, &[]).unwrap();
        assert_eq!(value, 5);
    }
}
