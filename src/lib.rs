//! Annotation-driven binding of header-style multi-maps onto typed structs.
//!
//! This crate populates the fields of a struct from a source of
//! key-to-multi-value text (HTTP headers and similar):
//! - **Annotations** name the source key of each field: `#[header("x-key")]`,
//!   or `#[header("-")]` to exclude it
//! - **Conversion** turns the text into the field's type: booleans, integers
//!   and floats of any width, `String`, `Vec<String>`
//! - **Custom hooks** let a field type parse its own value sequence
//!
//! Binding is one-directional (text to typed record) and first-error-wins.
//!
//! # Core Types
//!
//! - [`bind`] / [`Binder`]: the field walk, with configurable [`Narrowing`]
//! - [`HeaderSource`]: the header collaborator; [`HeaderMap`] is an ordered,
//!   case-insensitive implementation
//! - [`HeaderRecord`]: the per-field descriptor table, usually derived
//! - [`HeaderField`] / [`UnmarshalHeader`]: built-in and custom field types
//! - [`BindError`] / [`ParseError`]: what went wrong, and where
//!
//! # Examples
//!
//! ```
//! use header_bind::{BoxError, HeaderMap, HeaderRecord, UnmarshalHeader};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Ints(Vec<i64>);
//!
//! impl UnmarshalHeader for Ints {
//!     fn unmarshal_header(&mut self, values: &[&str]) -> Result<(), BoxError> {
//!         for value in values {
//!             self.0.push(value.parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug, Default, HeaderRecord)]
//! struct Request {
//!     #[header("x-string")]
//!     string: String,
//!     #[header("x-int8")]
//!     int8: i8,
//!     #[header("x-ints")]
//!     ints: Ints,
//!     #[header("-")]
//!     skip: (),
//! }
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("X-String", "some-string");
//! headers.insert("X-Int8", "-2");
//! headers.append("X-Ints", "1");
//! headers.append("X-Ints", "2");
//!
//! let mut request = Request::default();
//! header_bind::bind(&mut request, &headers).expect("headers bind");
//!
//! assert_eq!(request.string, "some-string");
//! assert_eq!(request.int8, -2);
//! assert_eq!(request.ints, Ints(vec![1, 2]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Lets `#[derive(HeaderRecord)]` name `::header_bind` inside this crate.
extern crate self as header_bind;

mod binder;
mod error;
mod field;
mod headers;
mod parse;
mod record;

#[cfg(test)]
mod test_utils;

pub use binder::{bind, Binder};
pub use error::{BindError, BoxError, ParseError, ParseKind};
pub use field::{FieldSlot, FloatSlot, HeaderField, IntSlot, UintSlot, UnmarshalHeader};
pub use headers::{HeaderMap, HeaderSource};
pub use parse::Narrowing;
pub use record::{FieldBinding, HeaderRecord, EXCLUDE_MARKER};

#[cfg(feature = "derive")]
pub use header_bind_derive::HeaderRecord;
