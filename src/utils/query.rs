//! Query-string assembly for list filters
//!
//! Filters omit every unset field, so an all-default filter renders an empty
//! query string and the server sees only the parameters the caller chose.

use url::form_urlencoded::Serializer;
use url::Url;

/// An ordered set of query parameters built from a list filter.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unconditionally.
    pub fn push<V: ToString>(&mut self, key: &str, value: V) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Add a parameter only when the field is set.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<&V>) {
        if let Some(v) = value {
            self.pairs.push((key.to_string(), v.to_string()));
        }
    }

    /// Add a boolean flag only when it is true (false is the zero value and
    /// is omitted from the wire).
    pub fn push_flag(&mut self, key: &str, value: bool) {
        if value {
            self.pairs.push((key.to_string(), "true".to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render the percent-encoded query string, without a leading `?`.
    /// Empty when no parameters are set.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Apply the parameters to a URL, replacing any existing query.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
            return;
        }
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in &self.pairs {
            query.append_pair(key, value);
        }
    }
}
