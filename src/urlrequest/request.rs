use crate::base::neterror::NetError;
use crate::base::readystate::ReadyState;
use crate::cookies::jar::{default_jar, CookieJar};
use crate::urlrequest::sync::{sync_recv, sync_send};
use crate::urlrequest::transport::Transport;
use std::sync::Arc;
use url::Url;

/// A cookie-aware wrapper around a transport.
///
/// Drop-in substitute for the bare transport: same operations, same
/// five-state lifecycle, plus automatic cookie handling. The target URL is
/// captured at `open` time; entering [`ReadyState::Opened`] attaches the
/// jar's cookies to the request exactly once, and entering
/// [`ReadyState::HeadersReceived`] absorbs the response's `Set-Cookie`
/// headers back into the jar.
///
/// The wrapper holds a reference to the inner transport and delegates,
/// rather than patching the transport's own methods in place.
pub struct CookieRequest<T: Transport> {
    inner: T,
    jar: Arc<CookieJar>,
    url: Option<Url>,
    sent_once: bool,
    /// When set, send/receive sync events are logged.
    pub debug: bool,
}

impl<T: Transport> CookieRequest<T> {
    /// Wrap a transport over the shared default jar.
    pub fn new(inner: T) -> Self {
        Self::with_jar(inner, default_jar())
    }

    /// Wrap a transport over a caller-owned jar.
    pub fn with_jar(inner: T, jar: Arc<CookieJar>) -> Self {
        Self {
            inner,
            jar,
            url: None,
            sent_once: false,
            debug: false,
        }
    }

    /// Begin a request: capture the target URL, then delegate to the inner
    /// transport's own open behavior.
    ///
    /// The send-once guard resets here, so a reused transport sends
    /// cookies again on its next logical request.
    pub fn open(&mut self, method: &str, url: &str) -> Result<(), NetError> {
        let parsed = Url::parse(url).map_err(|_| NetError::InvalidUrl)?;
        self.url = Some(parsed);
        self.sent_once = false;
        self.inner.open(method, url)?;

        // open() moves the transport into OPENED synchronously; run the
        // send-side sync here so cookies are attached even if the host's
        // event glue only reports later transitions.
        self.on_ready_state_change();
        Ok(())
    }

    /// React to a lifecycle transition of the inner transport.
    ///
    /// The host environment calls this on every readiness change. Entering
    /// `Opened` runs the send-side sync once per logical request, however
    /// many times the notification fires; entering `HeadersReceived` runs
    /// the receive-side sync unconditionally (re-absorbing the same
    /// response is an idempotent no-op, since the jar replaces by
    /// identity). All other states are ignored.
    pub fn on_ready_state_change(&mut self) {
        let Some(url) = self.url.clone() else {
            return;
        };

        match self.inner.ready_state() {
            ReadyState::Opened => {
                if !self.sent_once {
                    if self.debug {
                        tracing::info!(url = %url, "cookie send sync");
                    }
                    sync_send(&url, &mut self.inner, &self.jar);
                    self.sent_once = true;
                }
            }
            ReadyState::HeadersReceived => {
                if self.debug {
                    tracing::info!(url = %url, "cookie receive sync");
                }
                sync_recv(&url, &mut self.inner, &self.jar);
            }
            _ => {}
        }
    }

    /// Dispatch the opened request.
    pub fn send(&mut self, body: Option<&[u8]>) -> Result<(), NetError> {
        self.inner.send(body)
    }

    pub fn ready_state(&self) -> ReadyState {
        self.inner.ready_state()
    }

    pub fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        self.inner.set_request_header(name, value)
    }

    pub fn request_header(&self, name: &str) -> Option<String> {
        self.inner.request_header(name)
    }

    pub fn response_headers(&self, name: &str) -> Vec<String> {
        self.inner.response_headers(name)
    }

    /// The jar this request reads from and writes to.
    pub fn jar(&self) -> &Arc<CookieJar> {
        &self.jar
    }

    /// The captured target URL of the current request, if opened.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
