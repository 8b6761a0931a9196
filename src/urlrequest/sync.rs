//! The two jar/transport synchronization passes.
//!
//! [`sync_send`] attaches stored cookies to an outgoing request's `Cookie`
//! header; [`sync_recv`] absorbs a response's `Set-Cookie` header(s) into
//! the jar. Neither surfaces errors: an empty jar, an absent header, or a
//! malformed cookie line is a normal outcome for the request lifecycle.

use crate::cookies::jar::CookieJar;
use crate::urlrequest::transport::Transport;
use std::ops::{Deref, DerefMut};
use url::Url;

/// Relaxes strict header checking for the duration of one sync pass.
///
/// `Cookie` and `Set-Cookie` are forbidden header names for applications,
/// so the sync passes must write and read them with checking off. The
/// restore happens in `Drop`, so strict mode comes back on every exit path.
struct RelaxedHeaderCheck<'a> {
    transport: &'a mut dyn Transport,
}

impl<'a> RelaxedHeaderCheck<'a> {
    fn new(transport: &'a mut dyn Transport) -> Self {
        transport.set_header_check_disabled(true);
        Self { transport }
    }
}

impl Drop for RelaxedHeaderCheck<'_> {
    fn drop(&mut self) {
        self.transport.set_header_check_disabled(false);
    }
}

impl<'a> Deref for RelaxedHeaderCheck<'a> {
    type Target = dyn Transport + 'a;

    fn deref(&self) -> &Self::Target {
        self.transport
    }
}

impl<'a> DerefMut for RelaxedHeaderCheck<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.transport
    }
}

/// Attach the jar's applicable cookies to the request's `Cookie` header.
///
/// Any pre-existing header value is kept as a prefix. Cookies come back
/// from the jar already scope-matched and ordered; this pass applies the
/// scheme rules: `Secure` cookies only travel over `https`, and `HttpOnly`
/// cookies only travel over HTTP-family schemes (both `http` and `https`).
/// If nothing qualifies and no prior value existed, the header is left
/// unset rather than written empty.
pub fn sync_send(url: &Url, transport: &mut dyn Transport, jar: &CookieJar) {
    let mut transport = RelaxedHeaderCheck::new(transport);

    let mut header = transport.request_header("Cookie").unwrap_or_default();

    let secure_scheme = url.scheme() == "https";
    let http_family = matches!(url.scheme(), "http" | "https");

    for cookie in jar.get_cookies_for_url(url) {
        if cookie.secure && !secure_scheme {
            continue;
        }
        if cookie.http_only && !http_family {
            continue;
        }
        if !header.is_empty() {
            header.push_str("; ");
        }
        header.push_str(&cookie.name);
        header.push('=');
        header.push_str(&cookie.value);
    }

    if !header.is_empty() {
        tracing::debug!(url = %url, cookie = %header, "attaching cookie header");
        if let Err(e) = transport.set_request_header("Cookie", &header) {
            tracing::debug!(error = %e, "transport rejected cookie header");
        }
    }
}

/// Absorb the response's `Set-Cookie` header(s) into the jar.
///
/// Each value is parsed and stored independently; a malformed entry is
/// skipped without affecting the rest.
pub fn sync_recv(url: &Url, transport: &mut dyn Transport, jar: &CookieJar) {
    let transport = RelaxedHeaderCheck::new(transport);

    for line in transport.response_headers("Set-Cookie") {
        tracing::debug!(url = %url, line = %line, "received set-cookie");
        jar.parse_and_set_cookie(url, &line);
    }
}
