use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BookId = i64;

/// Maximum number of entries kept in the top-rated snapshot.
pub const TOP_RATED_LIMIT: usize = 10;

/// A catalog entry as served by `/books`.
///
/// Every field is required on the wire; legacy shapes that carry
/// `description` or `popularity` instead of `summary` and `rating` fail to
/// decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub rating: f64,
    pub isbn: String,
}

/// One page of a paginated result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index.
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size: 0,
            number: 0,
            first: true,
            last: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page holds {len} entries but its size is {size}")]
    Oversized { len: usize, size: u32 },
    #[error("page number {number} is outside 0..{total_pages}")]
    NumberOutOfRange { number: u32, total_pages: u32 },
}

impl<T> Page<T> {
    /// Checks the structural invariants a server page must satisfy.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.content.len() > self.size as usize {
            return Err(PageError::Oversized {
                len: self.content.len(),
                size: self.size,
            });
        }
        if self.total_elements > 0 && self.number >= self.total_pages {
            return Err(PageError::NumberOutOfRange {
                number: self.number,
                total_pages: self.total_pages,
            });
        }
        Ok(())
    }
}

/// An authenticated session: the bearer credential and the display identity.
///
/// Both fields are always present together. Anonymous is modelled as the
/// absence of an `AuthSession`, so a half-populated session cannot exist.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// An empty credential is never a usable session.
    pub fn is_usable(&self) -> bool {
        !self.token.is_empty()
    }
}

// Keep the credential out of debug logs.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body returned by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

impl From<AuthResponse> for AuthSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            username: response.username,
        }
    }
}
