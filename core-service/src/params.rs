//! Request parameter plumbing
//!
//! The protocol endpoint hands every request over as a flat list of
//! key/value pairs, usually straight from the URL query string. Keys may
//! repeat; the first occurrence wins.

use std::collections::HashMap;

use url::form_urlencoded;
use uuid::Uuid;

use crate::error::{Result, ServiceError};

/// Multi-valued request parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, Vec<String>>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs, keeping their order per key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    }

    /// Parse a URL query string (`a=1&b=two+words`), with or without the
    /// leading `?`.
    ///
    /// Decoding follows `application/x-www-form-urlencoded`: `+` is a
    /// space, malformed escapes such as a trailing `%` are kept literally
    /// and invalid UTF-8 is replaced. A key without `=` gets an empty value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `key`, in arrival order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First value for `key`, or [`ServiceError::MissingParameter`] when the
    /// key is absent or its value is empty.
    pub fn required_string(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ServiceError::MissingParameter(key.to_string())),
        }
    }

    /// First value for `key`, or `default` when absent or empty.
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key)
            .filter(|value| !value.is_empty())
            .unwrap_or(default)
    }

    /// First value for `key` parsed as an integer; `default` when absent or
    /// not a number.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::from_pairs(pairs)
    }
}

/// One incoming gateway request
#[derive(Debug, Clone)]
pub struct Request {
    id: String,
    params: RequestParams,
}

impl Request {
    /// Wrap `params` under a freshly generated request id.
    pub fn new(params: RequestParams) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), params)
    }

    /// Wrap `params` under a request id chosen by the host.
    pub fn with_id(id: impl Into<String>, params: RequestParams) -> Self {
        Self {
            id: id.into(),
            params,
        }
    }

    pub fn from_query(query: &str) -> Self {
        Self::new(RequestParams::from_query(query))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}
