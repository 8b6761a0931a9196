//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): crate-wide error type
//! - [`ReadyState`](readystate::ReadyState): request lifecycle states

pub mod neterror;
pub mod readystate;
