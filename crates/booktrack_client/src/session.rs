use std::sync::{Arc, Mutex};

use booktrack_core::{
    update_session, AuthResponse, AuthSession, Effect, LoginRequest, RegisterRequest, SessionMsg,
    SessionState,
};
use booktrack_logging::{bt_error, bt_info, bt_warn};

use crate::{lock, ApiError, ApiRequest, AuthError, KeyValueStore, Transport};

/// Storage key of the durable session record.
pub const SESSION_KEY: &str = "booktrack.auth";

/// Owns the authentication session and mirrors it into durable storage.
pub struct SessionStore {
    state: Mutex<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    transport: Arc<dyn Transport>,
}

impl SessionStore {
    /// Builds the store and recovers any previously persisted session.
    ///
    /// An unreadable or malformed record leaves the store anonymous.
    pub fn open(transport: Arc<dyn Transport>, storage: Arc<dyn KeyValueStore>) -> Self {
        let restored = load_session(storage.as_ref());
        let (state, _) = update_session(SessionState::new(), SessionMsg::Restored(restored));
        if let Some(user) = state.current_user() {
            bt_info!("Restored session for {}", user);
        }
        Self {
            state: Mutex::new(state),
            storage,
            transport,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).is_authenticated()
    }

    pub fn current_user(&self) -> Option<String> {
        lock(&self.state).current_user().map(ToOwned::to_owned)
    }

    /// Point-in-time copy of the session, handed to the transport per request.
    pub fn snapshot(&self) -> Option<AuthSession> {
        lock(&self.state).session().cloned()
    }

    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::post("/auth/login")
            .json(&body)
            .map_err(AuthError::Login)?;
        let response: AuthResponse = self
            .transport
            .send(request, self.snapshot().as_ref())
            .await
            .and_then(|response| response.json())
            .map_err(AuthError::Login)?;

        let session = AuthSession::from(response);
        if !session.is_usable() {
            return Err(AuthError::Login(ApiError::Decode(
                "login response carried an empty token".to_string(),
            )));
        }

        bt_info!("Logged in as {}", session.username);
        self.dispatch(SessionMsg::LoggedIn(session));
        Ok(())
    }

    /// Creates an account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::post("/auth/register")
            .json(&body)
            .map_err(AuthError::Registration)?;
        self.transport
            .send(request, self.snapshot().as_ref())
            .await
            .map_err(AuthError::Registration)?;
        bt_info!("Registered account {}", username);
        Ok(())
    }

    pub fn logout(&self) {
        if let Some(user) = self.current_user() {
            bt_info!("Logging out {}", user);
        }
        self.dispatch(SessionMsg::LoggedOut);
    }

    /// The state lock stays held while effects reach storage, so the durable
    /// record is written in the same order as the in-memory transitions.
    fn dispatch(&self, msg: SessionMsg) {
        let mut guard = lock(&self.state);
        let (next, effects) = update_session(std::mem::take(&mut *guard), msg);
        *guard = next;
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&self, effect: Effect) {
        match effect {
            Effect::PersistSession(session) => {
                let record = match serde_json::to_string(&session) {
                    Ok(text) => text,
                    Err(err) => {
                        bt_error!("Failed to serialize session record: {}", err);
                        return;
                    }
                };
                if let Err(err) = self.storage.set(SESSION_KEY, &record) {
                    bt_error!("Failed to persist session record: {}", err);
                }
            }
            Effect::ClearSession => {
                if let Err(err) = self.storage.remove(SESSION_KEY) {
                    bt_error!("Failed to erase session record: {}", err);
                }
            }
            Effect::RefreshFavorites => {}
        }
    }
}

fn load_session(storage: &dyn KeyValueStore) -> Option<AuthSession> {
    let text = match storage.get(SESSION_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            bt_warn!("Failed to read session record: {}", err);
            return None;
        }
    };

    match serde_json::from_str::<AuthSession>(&text) {
        Ok(session) if session.is_usable() => Some(session),
        Ok(_) => {
            bt_warn!("Ignoring session record with an empty token");
            None
        }
        Err(err) => {
            bt_warn!("Ignoring malformed session record: {}", err);
            None
        }
    }
}
