//! # cookienet
//!
//! A cookie-management layer for HTTP request objects.
//!
//! `cookienet` sits between an application and its HTTP transport,
//! maintaining a persistent cookie jar across requests: applicable cookies
//! are attached to each outgoing request's `Cookie` header, and cookies
//! from each response's `Set-Cookie` header(s) are absorbed back into the
//! jar, with RFC 6265-style domain, path, secure, and host-only scoping.
//!
//! ## Features
//!
//! - **Cookie Jar**: replace-by-identity storage with domain-suffix and
//!   path-prefix matching, expiry handling, and deterministic ordering
//! - **Automatic Sync**: attach-before-send and absorb-after-headers,
//!   driven by the request lifecycle
//! - **Domain Safety**: Public Suffix List validation and
//!   `__Secure-`/`__Host-` prefix enforcement
//! - **Persistence**: JSON save/load and Netscape cookies.txt import/export
//! - **Pluggable Transport**: any request object satisfying the
//!   [`Transport`](urlrequest::Transport) contract can be wrapped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cookienet::urlrequest::CookieRequest;
//!
//! let mut request = CookieRequest::new(my_transport);
//! request.open("GET", "https://example.com/")?;
//! request.send(None)?;
//! // ... transport reaches HEADERS_RECEIVED ...
//! request.on_ready_state_change(); // Set-Cookie values land in the jar
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`cookies`] - Cookie representation, jar, and persistence
//! - [`http`] - Header map and forbidden-header checking
//! - [`urlrequest`] - Transport contract, sync passes, request wrapper

pub mod base;
pub mod cookies;
pub mod http;
pub mod urlrequest;
