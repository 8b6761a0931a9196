//! Cookie persistence - save and load a jar to/from disk as JSON.
//!
//! Loading is the configuration-time path for swapping a jar's backing
//! store; failures here propagate to the caller instead of being swallowed
//! the way per-request cookie errors are.

use crate::base::neterror::NetError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::jar::CookieJar;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

use serde::{Deserialize, Serialize};

/// On-disk representation of one cookie.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    domain: String,
    path: String,
    secure: bool,
    http_only: bool,
    host_only: bool,
    expires_unix_secs: Option<i64>,
}

/// Save a jar's cookies to a JSON file.
pub fn save_cookies(jar: &CookieJar, path: &Path) -> Result<(), NetError> {
    let all_cookies: Vec<PersistentCookie> = jar
        .iter_all_cookies()
        .map(|cookie| PersistentCookie {
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
            name: cookie.name,
            value: cookie.value,
            domain: cookie.domain,
            path: cookie.path,
            secure: cookie.secure,
            http_only: cookie.http_only,
            host_only: cookie.host_only,
        })
        .collect();

    let json = serde_json::to_string_pretty(&all_cookies)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load cookies from a JSON file, skipping entries already expired on disk.
pub fn load_cookies(path: &Path) -> Result<Vec<CanonicalCookie>, NetError> {
    let json = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NetError::store_not_found(path.display().to_string())
        } else {
            e.into()
        }
    })?;

    let persistent: Vec<PersistentCookie> = serde_json::from_str(&json)?;

    let now = OffsetDateTime::now_utc();
    let mut cookies = Vec::with_capacity(persistent.len());

    for pc in persistent {
        let expiration_time = match pc.expires_unix_secs {
            Some(secs) => match OffsetDateTime::from_unix_timestamp(secs) {
                Ok(t) if t < now => continue,
                Ok(t) => Some(t),
                Err(_) => continue,
            },
            None => None,
        };

        cookies.push(CanonicalCookie {
            name: pc.name,
            value: pc.value,
            domain: pc.domain,
            path: pc.path,
            creation_time: now,
            expiration_time,
            secure: pc.secure,
            http_only: pc.http_only,
            host_only: pc.host_only,
        });
    }

    Ok(cookies)
}

/// Load a file and substitute it for the jar's backing store.
/// Returns the number of cookies now in the jar.
pub fn restore_cookies(jar: &CookieJar, path: &Path) -> Result<usize, NetError> {
    let cookies = load_cookies(path)?;
    jar.set_store(cookies);
    Ok(jar.total_cookie_count())
}
