use time::OffsetDateTime;
use url::Url;

/// A single stored cookie.
///
/// Identity within a jar is the (domain, path, name) triple; setting a
/// cookie with a matching identity replaces the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            secure: false,
            http_only: false,
            host_only: true,
        }
    }

    /// Session cookies (no expiration) never expire.
    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry < current_time,
            None => false,
        }
    }

    /// Whether this cookie's identity (domain, path, name) matches another's.
    pub fn same_identity(&self, other: &CanonicalCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute and a secure origin
    /// - __Host- cookies MUST also have Path="/" and no Domain attribute
    pub fn prefix_is_valid(&self, secure_origin: bool) -> bool {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return false;
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return false;
        }

        true
    }

    /// Parse one `Set-Cookie` line, scoped to the request URL.
    ///
    /// Missing attributes are defaulted per RFC 6265: no `Domain` makes the
    /// cookie host-only for the request host; no `Path` derives the
    /// default-path from the request path; `Max-Age` wins over `Expires`,
    /// and a non-positive `Max-Age` yields an already-expired cookie so the
    /// jar deletes the stored identity.
    ///
    /// Returns `None` for malformed input or a cookie whose explicit domain
    /// does not cover the request host. Parse failures never abort request
    /// processing.
    pub fn parse(url: &Url, set_cookie_line: &str) -> Option<Self> {
        let parsed = match cookie::Cookie::parse(set_cookie_line.trim()) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(error = %e, line = %set_cookie_line, "malformed set-cookie line");
                return None;
            }
        };

        let request_host = url.host_str().unwrap_or("").to_lowercase();
        let now = OffsetDateTime::now_utc();

        let (domain, host_only) = match parsed.domain() {
            Some(d) => {
                let d = d.trim_start_matches('.').to_lowercase();
                // Reject cookies scoped to public suffixes or to a domain
                // that does not cover the request host (supercookie defense).
                if !crate::cookies::psl::is_valid_cookie_domain(&d, &request_host) {
                    tracing::debug!(domain = %d, host = %request_host, "rejected cookie domain");
                    return None;
                }
                (d, false)
            }
            None => (request_host.clone(), true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url),
        };

        let expiration_time = match parsed.max_age() {
            Some(max_age) if max_age <= time::Duration::ZERO => {
                // Max-Age <= 0 is a deletion request.
                Some(OffsetDateTime::UNIX_EPOCH)
            }
            Some(max_age) => Some(now + max_age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let cookie = CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
        };

        if !cookie.prefix_is_valid(url.scheme() == "https") {
            tracing::debug!(name = %cookie.name, "rejected cookie with invalid prefix");
            return None;
        }

        Some(cookie)
    }
}

/// RFC 6265 section 5.1.4 default-path: the request path up to, but not
/// including, its rightmost `/`.
pub fn default_path(url: &Url) -> String {
    let path = url.path();
    if !path.starts_with('/') {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}
