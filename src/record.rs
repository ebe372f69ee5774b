use std::fmt;

use crate::field::FieldSlot;

/// Annotation value that excludes a field from binding.
pub const EXCLUDE_MARKER: &str = "-";

/// A struct whose fields can be populated from a header source.
///
/// Usually derived with `#[derive(HeaderRecord)]`, which reads the
/// `#[header("...")]` attribute on each field. Hand-written implementations
/// return one [`FieldBinding`] per field, in declaration order.
///
/// # Examples
///
/// ```
/// use header_bind::{FieldBinding, HeaderField, HeaderRecord};
///
/// #[derive(Default)]
/// struct Paging {
///     limit: u32,
///     cursor: String,
///     cache: Vec<u8>,
/// }
///
/// impl HeaderRecord for Paging {
///     fn header_fields(&mut self) -> Vec<FieldBinding<'_>> {
///         vec![
///             FieldBinding::keyed("limit", "x-limit", self.limit.header_slot()),
///             FieldBinding::keyed("cursor", "x-cursor", self.cursor.header_slot()),
///             FieldBinding::unannotated("cache"),
///         ]
///     }
/// }
///
/// let mut paging = Paging::default();
/// assert_eq!(paging.header_fields().len(), 3);
/// ```
pub trait HeaderRecord {
    /// Returns the binding descriptor of every field, in declaration order.
    fn header_fields(&mut self) -> Vec<FieldBinding<'_>>;
}

/// How one record field takes part in a bind call.
pub enum FieldBinding<'a> {
    /// Bound from the values stored under `key`
    Bound {
        /// Field name, for diagnostics
        field: &'static str,
        /// Source key named by the annotation
        key: &'static str,
        /// Handle the converted value is written through
        slot: FieldSlot<'a>,
    },
    /// Annotated with the exclusion marker
    Excluded {
        /// Field name, for diagnostics
        field: &'static str,
    },
    /// Carries no annotation
    Unannotated {
        /// Field name, for diagnostics
        field: &'static str,
    },
}

impl<'a> FieldBinding<'a> {
    /// Binds `field` from `key`, or excludes it when `key` is
    /// [`EXCLUDE_MARKER`].
    pub fn keyed(field: &'static str, key: &'static str, slot: FieldSlot<'a>) -> Self {
        if key == EXCLUDE_MARKER {
            FieldBinding::Excluded { field }
        } else {
            FieldBinding::Bound { field, key, slot }
        }
    }

    /// A field annotated with the exclusion marker.
    pub fn excluded(field: &'static str) -> Self {
        FieldBinding::Excluded { field }
    }

    /// A field with no annotation.
    pub fn unannotated(field: &'static str) -> Self {
        FieldBinding::Unannotated { field }
    }

    /// Returns the field name.
    pub fn field(&self) -> &'static str {
        match self {
            FieldBinding::Bound { field, .. }
            | FieldBinding::Excluded { field }
            | FieldBinding::Unannotated { field } => *field,
        }
    }

    /// Returns the source key, if the field is bound.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            FieldBinding::Bound { key, .. } => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldBinding::Bound { field, key, slot } => f
                .debug_struct("Bound")
                .field("field", field)
                .field("key", key)
                .field("type", &slot.type_name())
                .finish(),
            FieldBinding::Excluded { field } => {
                f.debug_struct("Excluded").field("field", field).finish()
            }
            FieldBinding::Unannotated { field } => {
                f.debug_struct("Unannotated").field("field", field).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::HeaderField;

    #[test]
    fn keyed_with_marker_is_excluded() {
        let mut value = 0_i32;
        let binding = FieldBinding::keyed("skip", EXCLUDE_MARKER, value.header_slot());

        assert!(matches!(binding, FieldBinding::Excluded { field: "skip" }));
        assert_eq!(binding.key(), None);
    }

    #[test]
    fn keyed_binding_exposes_key() {
        let mut value = String::new();
        let binding = FieldBinding::keyed("name", "x-name", value.header_slot());

        assert_eq!(binding.field(), "name");
        assert_eq!(binding.key(), Some("x-name"));
    }

    #[test]
    fn debug_shows_slot_type() {
        let mut value = 0_u16;
        let binding = FieldBinding::keyed("port", "x-port", value.header_slot());

        assert_eq!(
            format!("{:?}", binding),
            r#"Bound { field: "port", key: "x-port", type: "u16" }"#
        );
        assert_eq!(
            format!("{:?}", FieldBinding::unannotated("other")),
            r#"Unannotated { field: "other" }"#
        );
    }

    #[cfg(feature = "derive")]
    #[test]
    fn derived_table_matches_hand_written() {
        #[derive(Default, crate::HeaderRecord)]
        #[allow(dead_code)]
        struct Derived {
            #[header("x-limit")]
            limit: u32,
            #[header("-")]
            secret: String,
            cache: Vec<u8>,
        }

        #[derive(Default)]
        struct Manual {
            limit: u32,
        }

        impl HeaderRecord for Manual {
            fn header_fields(&mut self) -> Vec<FieldBinding<'_>> {
                vec![
                    FieldBinding::keyed("limit", "x-limit", self.limit.header_slot()),
                    FieldBinding::excluded("secret"),
                    FieldBinding::unannotated("cache"),
                ]
            }
        }

        let mut derived = Derived::default();
        let mut manual = Manual::default();
        let derived = format!("{:?}", derived.header_fields());
        let manual = format!("{:?}", manual.header_fields());

        assert_eq!(derived, manual);
    }
}
