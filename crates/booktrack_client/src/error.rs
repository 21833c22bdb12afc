use std::io;

use thiserror::Error;

/// Failure of a single request through the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response from the server.
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    /// The server answered with a non-success status.
    #[error("http status {status}")]
    Http { status: u16 },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
    /// The body did not match the expected wire shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("page holds {len} entries but its size is {size}")]
    InvalidPage { len: usize, size: u32 },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by the two authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("login failed: {0}")]
    Login(#[source] ApiError),
    #[error("registration failed: {0}")]
    Registration(#[source] ApiError),
}

impl AuthError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            AuthError::Login(err) | AuthError::Registration(err) => err,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.api_error().status()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage directory missing or not writable: {0}")]
    Directory(String),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
