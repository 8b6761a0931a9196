#![allow(dead_code)]

use cookienet::base::neterror::NetError;
use cookienet::base::readystate::ReadyState;
use cookienet::http::headers::{is_forbidden_request_header, OrderedHeaderMap};
use cookienet::urlrequest::Transport;

/// In-memory transport scripted by the test: tests move it through the
/// lifecycle and queue response headers by hand.
#[derive(Default)]
pub struct FakeTransport {
    state: ReadyState,
    request_headers: OrderedHeaderMap,
    response_headers: OrderedHeaderMap,
    header_check_disabled: bool,
    pub opened: Vec<(String, String)>,
    pub sent: usize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `Set-Cookie` values and move to HEADERS_RECEIVED.
    pub fn deliver_response(&mut self, set_cookie_lines: &[&str]) {
        for line in set_cookie_lines {
            self.response_headers.append("Set-Cookie", line).unwrap();
        }
        self.state = ReadyState::HeadersReceived;
    }

    pub fn finish(&mut self) {
        self.state = ReadyState::Done;
    }

    pub fn set_state(&mut self, state: ReadyState) {
        self.state = state;
    }
}

impl Transport for FakeTransport {
    fn open(&mut self, method: &str, url: &str) -> Result<(), NetError> {
        self.opened.push((method.to_string(), url.to_string()));
        self.request_headers = OrderedHeaderMap::new();
        self.response_headers = OrderedHeaderMap::new();
        self.state = ReadyState::Opened;
        Ok(())
    }

    fn send(&mut self, _body: Option<&[u8]>) -> Result<(), NetError> {
        if self.state != ReadyState::Opened {
            return Err(NetError::NotOpened);
        }
        self.sent += 1;
        Ok(())
    }

    fn ready_state(&self) -> ReadyState {
        self.state
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        if !self.header_check_disabled && is_forbidden_request_header(name) {
            return Err(NetError::forbidden_header(name));
        }
        self.request_headers.insert(name, value)
    }

    fn request_header(&self, name: &str) -> Option<String> {
        self.request_headers.get(name).map(str::to_owned)
    }

    fn response_headers(&self, name: &str) -> Vec<String> {
        self.response_headers.get_all(name)
    }

    fn set_header_check_disabled(&mut self, disabled: bool) {
        self.header_check_disabled = disabled;
    }

    fn header_check_disabled(&self) -> bool {
        self.header_check_disabled
    }
}
