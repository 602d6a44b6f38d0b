//! The HTTP-layer abstraction the query subsystem reads from.
//!
//! Routing itself is out of scope, so this crate does not depend on a
//! router crate: it only needs a request's method and its two
//! string-keyed parameter maps (query string, body), abstracted
//! behind [`ParamSource`] (`spec.md` §6).

use std::collections::HashMap;

/// The subset of HTTP methods that changes which parameter map is
/// read from (`spec.md` §6: "the subsystem reads from the
/// method-appropriate map").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A source of request parameters: a method plus two
/// string-to-string(-or-list) maps. Implement this over whatever
/// request type the host application already has; this crate never
/// constructs one itself except for [`RequestParams`].
pub trait ParamSource {
    /// The request method, determining which map [`ParamSource::get`]
    /// and [`ParamSource::get_all`] read from.
    fn method(&self) -> Method;

    /// The first value for `name` in the method-appropriate map.
    fn get(&self, name: &str) -> Option<&str>;

    /// All values for `name`, for multi-valued submissions (e.g. a
    /// `choice-set` form field submitted as repeated keys).
    fn get_all(&self, name: &str) -> Option<&[String]>;
}

/// A concrete, owned [`ParamSource`] for tests and for callers not
/// already carrying their own request type.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    method: Option<Method>,
    query: HashMap<String, Vec<String>>,
    body: HashMap<String, Vec<String>>,
}

impl RequestParams {
    /// An empty `GET` request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: Some(Method::Get),
            query: HashMap::new(),
            body: HashMap::new(),
        }
    }

    /// Sets the request method.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a single-valued query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Adds a multi-valued query parameter (repeated key).
    #[must_use]
    pub fn query_multi(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = String>,
    ) -> Self {
        self.query.entry(name.into()).or_default().extend(values);
        self
    }

    /// Adds a single-valued body parameter.
    #[must_use]
    pub fn body(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    fn active_map(&self) -> &HashMap<String, Vec<String>> {
        match self.method.unwrap_or(Method::Get) {
            Method::Get => &self.query,
            Method::Post => &self.body,
        }
    }
}

impl ParamSource for RequestParams {
    fn method(&self) -> Method {
        self.method.unwrap_or(Method::Get)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.active_map()
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn get_all(&self, name: &str) -> Option<&[String]> {
        self.active_map().get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_single_value() {
        let params = RequestParams::new().query("foo_name", "bar");
        assert_eq!(params.get("foo_name"), Some("bar"));
    }

    #[test]
    fn test_get_missing_is_none() {
        let params = RequestParams::new();
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_get_all_multi_value() {
        let params =
            RequestParams::new().query_multi("tags", ["red".to_string(), "blue".to_string()]);
        assert_eq!(
            params.get_all("tags"),
            Some(["red".to_string(), "blue".to_string()].as_slice())
        );
    }

    #[test]
    fn test_post_reads_body_not_query() {
        let params = RequestParams::new()
            .method(Method::Post)
            .query("foo_name", "from-query")
            .body("foo_name", "from-body");
        assert_eq!(params.get("foo_name"), Some("from-body"));
    }
}
