//! HTTP header plumbing.
//!
//! The cookie layer touches exactly two headers (`Cookie` on the request,
//! `Set-Cookie` on the response); [`headers`] provides the order-preserving
//! map transports keep them in, plus the forbidden request-header list that
//! strict header checking enforces.

pub mod headers;

pub use headers::OrderedHeaderMap;
