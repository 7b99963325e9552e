//! Common types used throughout the client
//!
//! This module contains the request parameter model shared by the
//! executor and the endpoint methods, plus a few serde helpers for the
//! loosely typed fields the API returns.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Request Parameters
// ============================================================================

/// Query parameter names owned by the client configuration
pub const CREDENTIAL_PARAMS: [&str; 2] = ["api_id", "affiliate_id"];

/// A scalar query parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! int_param {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Parameters of one request
///
/// Entries holding `None` are "unset": they are kept so callers can build
/// parameter sets field by field, but they never reach the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: BTreeMap<String, Option<ParamValue>>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter that may be unset
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// Set a parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Set a parameter that may be unset, in place
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.entries.insert(key.into(), value.map(Into::into));
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key).flatten()
    }

    /// Get a set parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Number of set parameters
    pub fn len(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// True when no parameter is set
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge another parameter set into this one, later values winning
    pub fn extend(&mut self, other: QueryParams) {
        self.entries.extend(other.entries);
    }

    /// Build parameters from any serializable struct or map
    ///
    /// `null` fields count as unset. Nested arrays or objects are rejected
    /// because the wire format only carries scalars.
    pub fn from_serialize<P: Serialize + ?Sized>(params: &P) -> Result<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| Error::invalid_param("<params>", e.to_string()))?;

        let map = match value {
            JsonValue::Object(map) => map,
            JsonValue::Null => return Ok(Self::new()),
            other => {
                return Err(Error::invalid_param(
                    "<params>",
                    format!("expected an object, got {other}"),
                ))
            }
        };

        let mut out = Self::new();
        for (key, value) in map {
            let value = match value {
                JsonValue::Null => None,
                JsonValue::String(s) => Some(ParamValue::Str(s)),
                JsonValue::Bool(b) => Some(ParamValue::Str(b.to_string())),
                JsonValue::Number(n) => Some(match n.as_i64() {
                    Some(i) => ParamValue::Int(i),
                    None => ParamValue::Float(n.as_f64().unwrap_or_default()),
                }),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(Error::invalid_param(key, "only scalar values are allowed"))
                }
            };
            out.entries.insert(key, value);
        }
        Ok(out)
    }

    /// Serialize to query pairs with the given credentials injected
    ///
    /// Caller supplied credential keys are dropped, unset entries skipped.
    pub fn to_pairs(&self, api_id: &str, affiliate_id: &str) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("api_id".to_string(), api_id.to_string()),
            ("affiliate_id".to_string(), affiliate_id.to_string()),
        ];
        pairs.extend(
            self.entries
                .iter()
                .filter(|(key, _)| !CREDENTIAL_PARAMS.contains(&key.as_str()))
                .filter_map(|(key, value)| value.as_ref().map(|v| (key.clone(), v.to_string()))),
        );
        pairs
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

// ============================================================================
// Serde Helpers
// ============================================================================

/// A value the API sends either natively or as a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
}

/// Deserialize a number that may arrive as a JSON number or a string
pub fn de_lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(v) => Ok(v),
        Lenient::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Like [`de_lenient`] for optional fields; `null` and `""` map to `None`
pub fn de_opt_lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<Lenient<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Value(v)) => Ok(Some(v)),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Lenient::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
