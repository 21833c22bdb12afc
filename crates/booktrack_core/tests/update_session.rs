use std::sync::Once;

use booktrack_core::{update_session, AuthSession, Effect, SessionMsg, SessionState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(booktrack_logging::initialize_for_tests);
}

#[test]
fn login_authenticates_and_requests_persistence() {
    init_logging();
    let session = AuthSession::new("t1", "alice");

    let (state, effects) = update_session(SessionState::new(), SessionMsg::LoggedIn(session.clone()));

    assert!(state.is_authenticated());
    assert_eq!(state.current_user(), Some("alice"));
    assert_eq!(state.credential(), Some("t1"));
    assert_eq!(effects, vec![Effect::PersistSession(session)]);
}

#[test]
fn second_login_replaces_the_session() {
    init_logging();
    let (state, _) = update_session(
        SessionState::new(),
        SessionMsg::LoggedIn(AuthSession::new("t1", "alice")),
    );
    let (state, effects) = update_session(state, SessionMsg::LoggedIn(AuthSession::new("t2", "bob")));

    assert_eq!(state.current_user(), Some("bob"));
    assert_eq!(state.credential(), Some("t2"));
    assert_eq!(effects.len(), 1);
}

#[test]
fn logout_is_idempotent() {
    init_logging();
    let (state, _) = update_session(
        SessionState::new(),
        SessionMsg::LoggedIn(AuthSession::new("t1", "alice")),
    );

    let (state, effects) = update_session(state, SessionMsg::LoggedOut);
    assert!(!state.is_authenticated());
    assert_eq!(state.current_user(), None);
    assert_eq!(effects, vec![Effect::ClearSession]);

    let (state, effects) = update_session(state, SessionMsg::LoggedOut);
    assert_eq!(state, SessionState::new());
    assert_eq!(effects, vec![Effect::ClearSession]);
}

#[test]
fn restore_never_writes_back() {
    init_logging();
    let (state, effects) = update_session(
        SessionState::new(),
        SessionMsg::Restored(Some(AuthSession::new("t1", "alice"))),
    );

    assert!(state.is_authenticated());
    assert!(effects.is_empty());
}

#[test]
fn restore_with_empty_token_stays_anonymous() {
    init_logging();
    let (state, effects) = update_session(
        SessionState::new(),
        SessionMsg::Restored(Some(AuthSession::new("", "alice"))),
    );

    assert!(!state.is_authenticated());
    assert_eq!(state.current_user(), None);
    assert!(effects.is_empty());
}
