//! BookTrack core: data model and pure state reducers for the client stores.
mod effect;
mod model;
mod msg;
mod state;
mod update;

pub use effect::Effect;
pub use model::{
    AuthResponse, AuthSession, Book, BookId, LoginRequest, Page, PageError, RegisterRequest,
    TOP_RATED_LIMIT,
};
pub use msg::{CatalogMsg, FavoritesMsg, SessionMsg};
pub use state::{CatalogState, FavoritesState, SessionState};
pub use update::{update_catalog, update_favorites, update_session};
