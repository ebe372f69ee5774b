use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Boxed error returned by [`UnmarshalHeader`](crate::UnmarshalHeader) hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can abort a bind call.
///
/// Binding is first-error-wins: the walk stops at the first failing field and
/// fields bound before it keep their new values.
#[derive(Debug, Error)]
pub enum BindError {
    /// The field's declared type has no built-in conversion and no custom hook.
    #[error("field `{field}` has unsupported type `{type_name}`")]
    UnsupportedType {
        /// Name of the offending field
        field: &'static str,
        /// Rust type name of the field
        type_name: &'static str,
    },
    /// The first header value could not be parsed into the field's type.
    #[error("field `{field}`: {source}")]
    Parse {
        /// Name of the offending field
        field: &'static str,
        /// The underlying parse failure
        #[source]
        source: ParseError,
    },
    /// A custom hook failed; its error is passed through unchanged.
    #[error(transparent)]
    Custom(BoxError),
}

impl BindError {
    /// Returns the name of the failing field, when the binder knows it.
    ///
    /// Custom hook errors are returned verbatim and carry no field name.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedType { field, .. } | Self::Parse { field, .. } => Some(field),
            Self::Custom(_) => None,
        }
    }

    /// Returns the parse failure behind this error, if it is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A header value that does not lexically match the expected primitive format.
///
/// Every variant carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not one of the accepted boolean literals
    #[error("invalid boolean `{input}`")]
    Bool {
        /// The rejected value
        input: String,
    },
    /// Not a base-10 signed 64-bit integer
    #[error("invalid integer `{input}`: {source}")]
    Int {
        /// The rejected value
        input: String,
        /// Diagnostic from the integer parser
        #[source]
        source: ParseIntError,
    },
    /// Not a base-10 unsigned 64-bit integer
    #[error("invalid unsigned integer `{input}`: {source}")]
    Uint {
        /// The rejected value
        input: String,
        /// Diagnostic from the integer parser
        #[source]
        source: ParseIntError,
    },
    /// Not a floating point number
    #[error("invalid float `{input}`: {source}")]
    Float {
        /// The rejected value
        input: String,
        /// Diagnostic from the float parser
        #[source]
        source: ParseFloatError,
    },
    /// Parsed, but does not fit the field's declared width.
    #[error("`{input}` is out of range for `{target}`")]
    OutOfRange {
        /// Numeric family the value was parsed as
        kind: ParseKind,
        /// The rejected value
        input: String,
        /// Declared type of the field
        target: &'static str,
    },
}

impl ParseError {
    /// Returns which primitive parser rejected the value.
    pub fn kind(&self) -> ParseKind {
        match self {
            Self::Bool { .. } => ParseKind::Bool,
            Self::Int { .. } => ParseKind::Int,
            Self::Uint { .. } => ParseKind::Uint,
            Self::Float { .. } => ParseKind::Float,
            Self::OutOfRange { kind, .. } => *kind,
        }
    }

    /// Returns the rejected header value.
    pub fn input(&self) -> &str {
        match self {
            Self::Bool { input }
            | Self::Int { input, .. }
            | Self::Uint { input, .. }
            | Self::Float { input, .. }
            | Self::OutOfRange { input, .. } => input,
        }
    }
}

/// The primitive parser a [`ParseError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    /// Boolean literal
    Bool,
    /// Signed integer
    Int,
    /// Unsigned integer
    Uint,
    /// Floating point
    Float,
}

impl fmt::Display for ParseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseKind::Bool => write!(f, "bool"),
            ParseKind::Int => write!(f, "int"),
            ParseKind::Uint => write!(f, "uint"),
            ParseKind::Float => write!(f, "float"),
        }
    }
}
