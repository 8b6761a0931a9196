//! Cookie storage and scope matching.
//!
//! - **Representation**: [`CanonicalCookie`](canonical_cookie::CanonicalCookie),
//!   one cookie with its domain/path/secure/httpOnly/expiry scope
//! - **Storage**: [`CookieJar`](jar::CookieJar), replace-by-identity with
//!   RFC 6265 domain and path matching; [`jar::default_jar`] is the shared
//!   process-wide instance
//! - **Persistence**: JSON save/load ([`persistence`]) and Netscape
//!   cookies.txt export/import ([`netscape`])
//! - **Domain safety**: public-suffix rejection ([`psl`])

pub mod canonical_cookie;
pub mod jar;
pub mod netscape;
pub mod persistence;
pub mod psl;

pub use canonical_cookie::CanonicalCookie;
pub use jar::{default_jar, CookieJar};
