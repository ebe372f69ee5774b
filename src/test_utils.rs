//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

/// Every accepted boolean literal paired with its value.
pub fn arb_bool_literal() -> impl Strategy<Value = (&'static str, bool)> {
    prop_oneof![
        Just(("1", true)),
        Just(("t", true)),
        Just(("T", true)),
        Just(("TRUE", true)),
        Just(("true", true)),
        Just(("True", true)),
        Just(("0", false)),
        Just(("f", false)),
        Just(("F", false)),
        Just(("FALSE", false)),
        Just(("false", false)),
        Just(("False", false)),
    ]
}

/// Text that no numeric parser accepts: starts with a letter other than the
/// ones `f64` parsing reserves for `inf`/`nan`.
pub fn arb_non_numeric() -> impl Strategy<Value = String> {
    prop::string::string_regex("[g-hj-mo-z][a-z0-9 ]{0,12}").unwrap()
}
