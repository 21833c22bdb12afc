use crate::AuthSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the session record to durable storage.
    PersistSession(AuthSession),
    /// Erase the session record from durable storage.
    ClearSession,
    /// Re-download the favorites list from the server.
    RefreshFavorites,
}
