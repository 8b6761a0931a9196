//! Netscape cookies.txt export and import.
//!
//! The format curl and wget understand: one tab-separated record per line,
//! `domain  include_subdomains  path  secure  expiry  name  value`.

use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::jar::CookieJar;
use time::OffsetDateTime;

/// Serialize a jar's cookies to Netscape format.
pub fn export_netscape(jar: &CookieJar) -> String {
    let mut lines = vec![
        "# Netscape HTTP Cookie File".to_string(),
        "# https://curl.se/docs/http-cookies.html".to_string(),
        String::new(),
    ];

    for cookie in jar.iter_all_cookies() {
        let include_subdomains = if cookie.host_only { "FALSE" } else { "TRUE" };
        let secure = if cookie.secure { "TRUE" } else { "FALSE" };
        let expiry = cookie
            .expiration_time
            .map(|t| t.unix_timestamp())
            .unwrap_or(0);

        // Non-host-only domains carry a leading dot
        let domain = if !cookie.host_only && !cookie.domain.starts_with('.') {
            format!(".{}", cookie.domain)
        } else {
            cookie.domain.clone()
        };

        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            domain, include_subdomains, cookie.path, secure, expiry, cookie.name, cookie.value
        ));
    }

    lines.join("\n")
}

/// Import Netscape-format content into a jar. Returns the number of
/// cookies imported. Comment lines and short records are skipped.
pub fn import_netscape(jar: &CookieJar, content: &str) -> usize {
    let mut count = 0;
    let now = OffsetDateTime::now_utc();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 7 {
            continue;
        }

        let host_only = parts[1].eq_ignore_ascii_case("FALSE");
        let expiry: i64 = parts[4].parse().unwrap_or(0);

        let expiration_time = if expiry > 0 {
            OffsetDateTime::from_unix_timestamp(expiry).ok()
        } else {
            None
        };

        let cookie = CanonicalCookie {
            name: parts[5].to_string(),
            value: parts[6].to_string(),
            domain: parts[0].trim_start_matches('.').to_string(),
            path: parts[2].to_string(),
            creation_time: now,
            expiration_time,
            secure: parts[3].eq_ignore_ascii_case("TRUE"),
            // The format has no httpOnly column
            http_only: false,
            host_only,
        };

        jar.set_cookie(cookie);
        count += 1;
    }

    count
}
