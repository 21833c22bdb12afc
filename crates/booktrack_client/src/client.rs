use std::sync::Arc;

use crate::{
    ApiError, CatalogStore, ClientSettings, FavoritesStore, KeyValueStore, ReqwestTransport,
    SessionStore, Transport,
};

/// Wires one transport, one session store and the two data stores together.
///
/// Cloning is cheap; clones share the same stores.
#[derive(Clone)]
pub struct BookTrackClient {
    session: Arc<SessionStore>,
    catalog: Arc<CatalogStore>,
    favorites: Arc<FavoritesStore>,
}

impl BookTrackClient {
    /// Builds the production stack on top of reqwest.
    pub fn new(
        settings: &ClientSettings,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::new(settings)?);
        Ok(Self::with_transport(transport, storage))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = Arc::new(SessionStore::open(transport.clone(), storage));
        let catalog = Arc::new(CatalogStore::new(transport.clone(), session.clone()));
        let favorites = Arc::new(FavoritesStore::new(transport, session.clone()));
        Self {
            session,
            catalog,
            favorites,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }
}
