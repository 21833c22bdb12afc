use crate::{AuthSession, Book, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMsg {
    /// Session recovered from durable storage at startup (or nothing found).
    Restored(Option<AuthSession>),
    /// Server accepted a login.
    LoggedIn(AuthSession),
    /// User asked to end the session.
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMsg {
    /// A search request is about to be sent.
    SearchStarted,
    /// A search response arrived; it replaces the current page.
    SearchResolved(Page<Book>),
    /// A search request failed or was abandoned.
    SearchFailed,
    Top10Loaded(Vec<Book>),
    DetailsLoaded(Book),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesMsg {
    /// Fresh favorites snapshot from the server.
    Loaded(Vec<Book>),
    /// A toggle request finished, successfully or not.
    ToggleSettled,
}
