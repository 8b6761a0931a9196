use thiserror::Error;

/// Crate-wide error type.
///
/// Cookie processing itself never surfaces errors into the request
/// lifecycle; these variants cover the configuration-time and boundary
/// failures callers do see (bad URLs, rejected headers, store load/save
/// problems).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid header name or value")]
    InvalidHeader,

    #[error("Forbidden request header: {name}")]
    ForbiddenHeader { name: String },

    #[error("Request not opened")]
    NotOpened,

    #[error("Cookie store not found: {path}")]
    CookieStoreNotFound { path: String },

    #[error("Cookie store malformed: {message}")]
    CookieStoreInvalid { message: String },

    #[error("Cookie store I/O error: {message}")]
    CookieStoreIo { message: String },
}

impl NetError {
    pub fn forbidden_header(name: impl Into<String>) -> Self {
        NetError::ForbiddenHeader { name: name.into() }
    }

    pub fn store_not_found(path: impl Into<String>) -> Self {
        NetError::CookieStoreNotFound { path: path.into() }
    }

    pub fn store_invalid(message: impl Into<String>) -> Self {
        NetError::CookieStoreInvalid {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for NetError {
    fn from(err: std::io::Error) -> Self {
        NetError::CookieStoreIo {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::CookieStoreInvalid {
            message: err.to_string(),
        }
    }
}
