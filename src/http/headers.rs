use crate::base::neterror::NetError;
use http::header::{HeaderName, HeaderValue};
use std::str::FromStr;

/// Request header names an application is normally not allowed to set
/// directly. Mirrors the XMLHttpRequest forbidden-header list; the cookie
/// sync layer bypasses it by relaxing the check for the duration of one
/// operation.
const FORBIDDEN_REQUEST_HEADERS: &[&str] = &[
    "accept-charset",
    "accept-encoding",
    "connection",
    "content-length",
    "cookie",
    "cookie2",
    "date",
    "dnt",
    "expect",
    "host",
    "keep-alive",
    "origin",
    "referer",
    "set-cookie",
    "set-cookie2",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "via",
];

/// Whether a header name is on the forbidden request-header list.
/// Case-insensitive; `Proxy-` and `Sec-` prefixes are also forbidden.
pub fn is_forbidden_request_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if lower.starts_with("proxy-") || lower.starts_with("sec-") {
        return true;
    }
    FORBIDDEN_REQUEST_HEADERS.contains(&lower.as_str())
}

/// A header map that preserves insertion order.
///
/// Keyed by `http::HeaderName`, so lookups are case-insensitive and names
/// are validated on insert. Repeated values for one name are kept (the
/// `Set-Cookie` response header may appear any number of times).
#[derive(Debug, Clone, Default)]
pub struct OrderedHeaderMap {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl OrderedHeaderMap {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Set a header, updating in place if the name already exists.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let name = HeaderName::from_str(name).map_err(|_| NetError::InvalidHeader)?;
        let value = HeaderValue::from_str(value).map_err(|_| NetError::InvalidHeader)?;

        if let Some((_, v)) = self.headers.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.headers.push((name, value));
        }
        Ok(())
    }

    /// Append a header without replacing earlier values of the same name.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let name = HeaderName::from_str(name).map_err(|_| NetError::InvalidHeader)?;
        let value = HeaderValue::from_str(value).map_err(|_| NetError::InvalidHeader)?;
        self.headers.push((name, value));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) {
        if let Ok(target) = HeaderName::from_str(name) {
            self.headers.retain(|(n, _)| *n != target);
        }
    }

    /// First value for a name, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        let target = HeaderName::from_str(name).ok()?;
        self.headers
            .iter()
            .find(|(n, _)| *n == target)
            .and_then(|(_, v)| v.to_str().ok())
    }

    /// All values for a name, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        let Ok(target) = HeaderName::from_str(name) else {
            return Vec::new();
        };
        self.headers
            .iter()
            .filter(|(n, _)| *n == target)
            .filter_map(|(_, v)| v.to_str().ok().map(str::to_owned))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
