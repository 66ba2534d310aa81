/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Query-string parsing and URL composition.
//!
//! Core structures:
//! - `RawParams`: name → ordered string values, first-appearance key order
//! - `LocationCodec`: parse/compose with optional percent-(de/en)coding
//!
//! Only flat repeated-key semantics are supported (`tag=a&tag=b`); bracket
//! or otherwise nested syntaxes pass through as plain names.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Raw query parameters extracted from a URL, before any typed decoding.
///
/// Keys are unique and keep first-appearance order; repeated occurrences of
/// the same name accumulate into one ordered value list. One `RawParams`
/// lives for a single navigation event and is discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: IndexMap<String, Vec<String>>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, accumulating repeated names.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.push(name, value);
        }
        params
    }

    /// Append one value under `name`, preserving arrival order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// All values recorded for `name`, in arrival order. Missing names yield
    /// an empty slice rather than an error.
    pub fn values(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value recorded for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, values)` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Parses the query portion of a location and composes outbound URLs.
///
/// Percent handling is a construction-time choice: with `percent_encoding`
/// on (the default), parsing decodes each name and value exactly once using
/// form-urlencoded rules (`+` is a space) and composition encodes the same
/// way; with it off, byte strings pass through untouched in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationCodec {
    percent_encoding: bool,
}

impl Default for LocationCodec {
    fn default() -> Self {
        Self {
            percent_encoding: true,
        }
    }
}

impl LocationCodec {
    pub const fn new(percent_encoding: bool) -> Self {
        Self { percent_encoding }
    }

    pub const fn percent_encoding(&self) -> bool {
        self.percent_encoding
    }

    /// Split a raw location into `(path, query)`, dropping any fragment.
    /// The query is everything after the first `?` and may be empty.
    pub fn split_location(location: &str) -> (&str, &str) {
        let no_fragment = location.split('#').next().unwrap_or(location);
        match no_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (no_fragment, ""),
        }
    }

    /// Parse a query string into raw parameters.
    ///
    /// Segments are split on `&`, then on the first `=`. Segments with no
    /// `=`, a blank name, or a blank value are dropped silently — lenient by
    /// policy, never an error. Repeated names accumulate in appearance order.
    pub fn parse_query(&self, query: &str) -> RawParams {
        let mut params = RawParams::new();
        if query.is_empty() {
            return params;
        }

        if self.percent_encoding {
            for (name, value) in form_urlencoded::parse(query.as_bytes()) {
                if name.is_empty() || value.is_empty() {
                    continue;
                }
                params.push(name.into_owned(), value.into_owned());
            }
        } else {
            for segment in query.split('&') {
                let Some((name, value)) = segment.split_once('=') else {
                    continue;
                };
                if name.is_empty() || value.is_empty() {
                    continue;
                }
                params.push(name, value);
            }
        }

        params
    }

    /// Compose a navigation URL from a path plus query parameters.
    ///
    /// The path is taken verbatim; parameters follow in `RawParams` order,
    /// each value as its own `name=value` pair. When the path already has a
    /// query section the parameters are appended with `&`.
    pub fn compose(&self, path: &str, params: &RawParams) -> String {
        let query = self.compose_query(params);
        if query.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{query}")
    }

    /// Render just the query section (no leading `?`).
    pub fn compose_query(&self, params: &RawParams) -> String {
        if self.percent_encoding {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (name, values) in params.iter() {
                for value in values {
                    serializer.append_pair(name, value);
                }
            }
            serializer.finish()
        } else {
            let mut query = String::new();
            for (name, values) in params.iter() {
                for value in values {
                    if !query.is_empty() {
                        query.push('&');
                    }
                    query.push_str(name);
                    query.push('=');
                    query.push_str(value);
                }
            }
            query
        }
    }
}
