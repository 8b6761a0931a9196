use crate::base::neterror::NetError;
use crate::base::readystate::ReadyState;

/// The boundary contract with the underlying request/transport object.
///
/// The cookie layer needs very little from a transport: the lifecycle
/// state, read/write access to one request header (`Cookie`), read access
/// to one response header (`Set-Cookie`, possibly repeated), and the switch
/// that relaxes strict request-header checking while the cookie layer
/// writes headers an application could not.
///
/// A transport owns its lifecycle; this crate only observes it. Whoever
/// drives the transport must surface each [`ReadyState`] transition to the
/// wrapping [`CookieRequest`](crate::urlrequest::request::CookieRequest)
/// via [`on_ready_state_change`](crate::urlrequest::request::CookieRequest::on_ready_state_change).
pub trait Transport {
    /// Begin a request. Moves the transport into [`ReadyState::Opened`].
    fn open(&mut self, method: &str, url: &str) -> Result<(), NetError>;

    /// Dispatch the opened request.
    fn send(&mut self, body: Option<&[u8]>) -> Result<(), NetError>;

    fn ready_state(&self) -> ReadyState;

    /// Set a request header. Under strict checking (the default), names on
    /// the forbidden request-header list are rejected with
    /// [`NetError::ForbiddenHeader`].
    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), NetError>;

    /// Current value of a request header, if set.
    fn request_header(&self, name: &str) -> Option<String>;

    /// All values of a response header, in arrival order. Empty before
    /// headers are received or when the header is absent.
    fn response_headers(&self, name: &str) -> Vec<String>;

    /// Relax or restore strict request-header-name checking.
    fn set_header_check_disabled(&mut self, disabled: bool);

    fn header_check_disabled(&self) -> bool;
}
