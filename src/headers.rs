//! Header sources the binder reads from.
//!
//! The binder never normalizes keys. Whether `X-Int` and `x-int` name the same
//! entry is decided entirely by the [`HeaderSource`] implementation:
//!
//! - [`HeaderMap`] compares keys ASCII case-insensitively.
//! - `HashMap<String, Vec<String>>` compares keys exactly.
//! - `http::HeaderMap` (feature `http`) compares keys case-insensitively.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// Read-only view of a key-to-multi-value text mapping.
///
/// # Examples
///
/// ```
/// use header_bind::HeaderSource;
///
/// struct Single(&'static str, &'static str);
///
/// impl HeaderSource for Single {
///     fn is_empty(&self) -> bool {
///         false
///     }
///
///     fn header_values(&self, key: &str) -> Vec<&str> {
///         if key.eq_ignore_ascii_case(self.0) {
///             vec![self.1]
///         } else {
///             Vec::new()
///         }
///     }
/// }
///
/// let source = Single("x-request-id", "abc");
/// assert_eq!(source.header_values("X-Request-Id"), vec!["abc"]);
/// ```
pub trait HeaderSource {
    /// Returns `true` if the source holds no keys at all.
    fn is_empty(&self) -> bool;

    /// Returns the values stored under `key`, in insertion order.
    ///
    /// An absent key and a key with zero values both yield an empty vector.
    fn header_values(&self, key: &str) -> Vec<&str>;
}

/// An ordered multi-map from case-insensitive keys to string values.
///
/// Keys keep the spelling of their first insertion and are compared ASCII
/// case-insensitively. Keys and the values under each key stay in insertion
/// order. A key may be present with no values.
///
/// # Examples
///
/// ```
/// use header_bind::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.append("X-Slice", "some");
/// headers.append("x-slice", "slice");
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get_all("X-SLICE"), ["some", "slice"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: Vec<HeaderEntry>,
}

#[derive(Debug, Clone)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

impl HeaderMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Adds `value` after any values already stored under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => self.entries[index].values.push(value),
            None => self.entries.push(HeaderEntry {
                name: key,
                values: vec![value],
            }),
        }
    }

    /// Replaces every value stored under `key` with `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value: String = value.into();
        self.insert_all(key, [value]);
    }

    /// Replaces every value stored under `key` with `values`.
    ///
    /// An empty `values` leaves the key present with no values.
    pub fn insert_all<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.position(&key) {
            Some(index) => self.entries[index].values = values,
            None => self.entries.push(HeaderEntry { name: key, values }),
        }
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.position(key)
            .map(|index| self.entries[index].values.as_slice())
            .unwrap_or_default()
    }

    /// Returns `true` if `key` is present, even with no values.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key`, returning its values if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key)
            .map(|index| self.entries.remove(index).values)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(key))
    }
}

impl<K, V> Extend<(K, V)> for HeaderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderMap::new();
        headers.extend(iter);
        headers
    }
}

impl HeaderSource for HeaderMap {
    fn is_empty(&self) -> bool {
        HeaderMap::is_empty(self)
    }

    fn header_values(&self, key: &str) -> Vec<&str> {
        self.get_all(key).iter().map(String::as_str).collect()
    }
}

impl<S: BuildHasher> HeaderSource for HashMap<String, Vec<String>, S> {
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn header_values(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Values that are not visible ASCII are skipped.
#[cfg(feature = "http")]
impl HeaderSource for http::HeaderMap {
    fn is_empty(&self) -> bool {
        http::HeaderMap::is_empty(self)
    }

    fn header_values(&self, key: &str) -> Vec<&str> {
        self.get_all(key)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }
}
