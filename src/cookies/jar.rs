use crate::cookies::canonical_cookie::CanonicalCookie;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain.
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies across all domains.
const MAX_COOKIES_TOTAL: usize = 3000;

/// The process-wide default jar, lazily constructed. Every request wrapper
/// that is not given its own jar shares this one, so a cookie absorbed from
/// one response is visible to the next request's send pass.
static DEFAULT_JAR: Lazy<Arc<CookieJar>> = Lazy::new(|| Arc::new(CookieJar::new()));

/// Handle to the shared default jar.
pub fn default_jar() -> Arc<CookieJar> {
    DEFAULT_JAR.clone()
}

/// The authoritative cookie store.
///
/// Cookies are bucketed by domain; within a bucket a cookie is identified
/// by (path, name), making the full identity (domain, path, name). Setting
/// a cookie with a matching identity replaces the stored one; setting an
/// already-expired cookie deletes it.
pub struct CookieJar {
    store: DashMap<String, Vec<CanonicalCookie>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Store a cookie, replacing any stored cookie with the same identity.
    ///
    /// An expired cookie acts as a deletion request: the matching stored
    /// cookie is removed and the expired one is not kept.
    pub fn set_cookie(&self, cookie: CanonicalCookie) {
        let now = OffsetDateTime::now_utc();
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        entry.retain(|c| !c.same_identity(&cookie));

        if cookie.is_expired(now) {
            tracing::debug!(name = %cookie.name, domain = %cookie.domain, "expired cookie removed");
            if entry.is_empty() {
                let domain = cookie.domain.clone();
                drop(entry);
                self.store.remove_if(&domain, |_, v| v.is_empty());
            }
            return;
        }

        // Enforce per-domain limit, evicting oldest first
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                entry.remove(oldest_idx);
            } else {
                break;
            }
        }

        entry.push(cookie);
        drop(entry); // Release bucket before taking the global count

        self.enforce_global_limit();
    }

    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .is_some_and(|(_, _, t)| cookie.creation_time < *t);
                    if oldest.is_none() || older {
                        oldest = Some((entry.key().clone(), idx, cookie.creation_time));
                    }
                }
            }

            if let Some((domain, idx, _)) = oldest {
                if let Some(mut entry) = self.store.get_mut(&domain) {
                    if idx < entry.len() {
                        entry.remove(idx);
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Parse one `Set-Cookie` line against the request URL and store the
    /// result. Malformed or rejected lines are a silent no-op.
    pub fn parse_and_set_cookie(&self, url: &Url, set_cookie_line: &str) {
        if let Some(cookie) = CanonicalCookie::parse(url, set_cookie_line) {
            self.set_cookie(cookie);
        }
    }

    /// Cookies applicable to a URL: domain match (host-only exact, else
    /// suffix match), path prefix match, not expired.
    ///
    /// The secure/http-only scheme rules are applied by the send-side sync,
    /// not here; the jar answers purely by scope.
    ///
    /// Order is deterministic: longest path first, then oldest creation
    /// time.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("").to_lowercase();
        let now = OffsetDateTime::now_utc();

        for domain in Self::matching_domains(&host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !Self::domain_matches(&cookie.domain, &host, cookie.host_only) {
                        continue;
                    }
                    if !Self::path_matches(&cookie.path, url.path()) {
                        continue;
                    }
                    if cookie.is_expired(now) {
                        continue;
                    }
                    result.push(cookie.clone());
                }
            }
        }

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// RFC 6265 domain matching: host-only cookies require an exact match;
    /// domain cookies match the domain itself and any subdomain of it.
    fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
        if host_only {
            return cookie_domain.eq_ignore_ascii_case(request_host);
        }

        let cookie_domain = cookie_domain.trim_start_matches('.');

        if request_host.eq_ignore_ascii_case(cookie_domain) {
            return true;
        }

        if request_host.len() > cookie_domain.len() {
            let suffix = &request_host[request_host.len() - cookie_domain.len()..];
            if suffix.eq_ignore_ascii_case(cookie_domain) {
                let char_before = request_host
                    .chars()
                    .nth(request_host.len() - cookie_domain.len() - 1);
                return char_before == Some('.');
            }
        }

        false
    }

    /// RFC 6265 path matching: the cookie path is the request path, or a
    /// prefix of it ending at a `/` boundary.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if request_path.starts_with(cookie_path) {
            if cookie_path.ends_with('/') {
                return true;
            }
            return request_path.chars().nth(cookie_path.len()) == Some('/');
        }

        false
    }

    /// The host itself plus every parent domain that could hold a matching
    /// domain cookie (for "a.b.example.com": "b.example.com", "example.com").
    fn matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }

    /// Wholesale replacement of the backing collection.
    ///
    /// This is a substitution, not a merge: every previously stored cookie
    /// is dropped, and every cookie from `store` is re-inserted under the
    /// usual identity and limit rules. Takes effect for all holders of this
    /// jar.
    pub fn set_store<I>(&self, store: I)
    where
        I: IntoIterator<Item = CanonicalCookie>,
    {
        self.store.clear();
        for cookie in store {
            self.set_cookie(cookie);
        }
    }

    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Remove every cookie.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Snapshot of all stored cookies (for persistence and export).
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn make_cookie(name: &str, domain: &str, path: &str) -> CanonicalCookie {
        let now = OffsetDateTime::now_utc();
        CanonicalCookie {
            name: name.to_string(),
            value: "v".to_string(),
            domain: domain.to_string(),
            path: path.to_string(),
            creation_time: now,
            expiration_time: Some(now + Duration::days(30)),
            secure: false,
            http_only: false,
            host_only: true,
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_replace_by_identity() {
        let jar = CookieJar::new();
        let mut first = make_cookie("sid", "example.com", "/");
        first.value = "old".to_string();
        let mut second = make_cookie("sid", "example.com", "/");
        second.value = "new".to_string();
        second.secure = true;

        jar.set_cookie(first);
        jar.set_cookie(second);

        assert_eq!(jar.total_cookie_count(), 1);
        let stored = jar.get_cookies_for_url(&url("https://example.com/")).remove(0);
        assert_eq!(stored.value, "new");
        assert!(stored.secure);
    }

    #[test]
    fn test_distinct_paths_are_distinct_identities() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("sid", "example.com", "/"));
        jar.set_cookie(make_cookie("sid", "example.com", "/admin"));

        assert_eq!(jar.total_cookie_count(), 2);
    }

    #[test]
    fn test_expired_cookie_deletes_stored_identity() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("sid", "example.com", "/"));

        let mut expired = make_cookie("sid", "example.com", "/");
        expired.expiration_time = Some(OffsetDateTime::UNIX_EPOCH);
        jar.set_cookie(expired);

        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_expired_cookies_excluded_from_queries() {
        let jar = CookieJar::new();
        let mut c = make_cookie("sid", "example.com", "/");
        jar.set_cookie(c.clone());

        // Expire it in place via replacement with a short-lived twin
        c.expiration_time = Some(OffsetDateTime::now_utc() - Duration::seconds(1));
        let target = url("http://example.com/");
        assert!(jar.get_cookies_for_url(&target).len() == 1);
        jar.store.insert("example.com".into(), vec![c]);
        assert!(jar.get_cookies_for_url(&target).is_empty());
    }

    #[test]
    fn test_domain_suffix_matching() {
        let jar = CookieJar::new();
        let mut c = make_cookie("d", "example.com", "/");
        c.host_only = false;
        jar.set_cookie(c);
        jar.set_cookie(make_cookie("h", "example.com", "/"));

        let sub = jar.get_cookies_for_url(&url("http://sub.example.com/"));
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].name, "d");

        // No partial-label match: "ample.com" must not see "example.com" cookies
        assert!(jar.get_cookies_for_url(&url("http://notexample.com/")).is_empty());
    }

    #[test]
    fn test_host_only_requires_exact_host() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("h", "example.com", "/"));

        assert_eq!(jar.get_cookies_for_url(&url("http://example.com/")).len(), 1);
        assert!(jar.get_cookies_for_url(&url("http://sub.example.com/")).is_empty());
    }

    #[test]
    fn test_path_prefix_matching() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("root", "example.com", "/"));
        jar.set_cookie(make_cookie("foo", "example.com", "/foo"));
        jar.set_cookie(make_cookie("baz", "example.com", "/baz"));

        let cookies = jar.get_cookies_for_url(&url("http://example.com/foo/bar"));
        let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "root"]);

        // "/foobar" is not under "/foo"
        let cookies = jar.get_cookies_for_url(&url("http://example.com/foobar"));
        let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["root"]);
    }

    #[test]
    fn test_ordering_longest_path_first() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("a", "example.com", "/"));
        jar.set_cookie(make_cookie("b", "example.com", "/x/y"));
        jar.set_cookie(make_cookie("c", "example.com", "/x"));

        let cookies = jar.get_cookies_for_url(&url("http://example.com/x/y/z"));
        let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_set_store_replaces_not_merges() {
        let jar = CookieJar::new();
        jar.set_cookie(make_cookie("old", "example.com", "/"));

        jar.set_store(vec![
            make_cookie("new1", "other.com", "/"),
            make_cookie("new2", "other.com", "/x"),
        ]);

        assert_eq!(jar.total_cookie_count(), 2);
        assert!(jar.get_cookies_for_url(&url("http://example.com/")).is_empty());
    }

    #[test]
    fn test_per_domain_limit_evicts_oldest() {
        let jar = CookieJar::new();
        let base = OffsetDateTime::now_utc();
        for i in 0..(MAX_COOKIES_PER_DOMAIN + 5) {
            let mut c = make_cookie(&format!("c{}", i), "example.com", "/");
            c.creation_time = base + Duration::seconds(i as i64);
            jar.set_cookie(c);
        }

        assert_eq!(jar.total_cookie_count(), MAX_COOKIES_PER_DOMAIN);
        let cookies = jar.get_cookies_for_url(&url("http://example.com/"));
        assert!(!cookies.iter().any(|c| c.name == "c0"));
        let last = format!("c{}", MAX_COOKIES_PER_DOMAIN + 4);
        assert!(cookies.iter().any(|c| c.name == last));
    }

    #[test]
    fn test_default_jar_is_shared() {
        let a = default_jar();
        let b = default_jar();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
