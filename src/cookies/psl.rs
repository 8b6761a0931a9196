//! Public Suffix List validation for cookie domain scoping.
//!
//! Rejects cookies whose explicit `Domain` attribute names a public suffix
//! (`.com`, `.co.uk`, ...) or a domain the request host is not under.
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use psl::{List, Psl};

/// Check if a domain is itself a public suffix (e.g. "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        // Unknown TLD, treat as not a suffix
        None => false,
    }
}

/// Check if a cookie domain may scope cookies for a given request host:
/// the domain must not be a public suffix, and the host must equal it or
/// be a subdomain of it.
pub fn is_valid_cookie_domain(cookie_domain: &str, request_host: &str) -> bool {
    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(cookie_domain);
    let cookie_domain = cookie_domain.to_lowercase();
    let request_host = request_host.to_lowercase();

    if is_public_suffix(&cookie_domain) {
        return false;
    }

    if request_host == cookie_domain {
        return true;
    }

    request_host.ends_with(&format!(".{}", cookie_domain))
}
