// crates/backend-lib/tests/persistent_session.rs
use std::sync::Arc;
use std::time::Duration;

use ridesafe_backend::auth::{DemoAuth, GatePolicy, SessionGate, SessionState};
use ridesafe_backend::storage::{FlatFileStorage, Storage};
use ridesafe_common::{Route, RouteDecision};
use tempfile::TempDir;

fn open(dir: &TempDir) -> SessionGate<FlatFileStorage> {
    let storage = FlatFileStorage::new(dir.path()).unwrap();
    let policy = GatePolicy {
        signup_delay: Duration::ZERO,
        ..GatePolicy::default()
    };
    SessionGate::new(storage, Arc::new(DemoAuth::new(Duration::ZERO)), policy)
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let gate = open(&dir);
    assert_eq!(gate.state().await.unwrap(), SessionState::Anonymous);
    gate.login("mara@ride.safe", "sidecar").await.unwrap();
    drop(gate);

    // a fresh process starts from whatever is on disk
    let gate = open(&dir);
    assert_eq!(gate.state().await.unwrap(), SessionState::Authenticated);
    let identity = gate.current_identity().await.unwrap().unwrap();
    assert_eq!(identity.name, "mara");
    assert_eq!(identity.email, "mara@ride.safe");

    gate.logout().await.unwrap();
    drop(gate);

    let gate = open(&dir);
    assert_eq!(gate.state().await.unwrap(), SessionState::Anonymous);
    assert_eq!(
        gate.decide(&Route::Home).await.unwrap(),
        RouteDecision::redirect_replace(&Route::Login)
    );
}

#[tokio::test]
async fn test_failed_login_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let gate = open(&dir);

    assert!(gate.login("", "pw").await.is_err());
    assert!(gate.login("mara@ride.safe", "").await.is_err());
    assert!(!gate.storage().path().exists());
    assert_eq!(gate.storage().get("auth_token").await.unwrap(), None);
}

#[tokio::test]
async fn test_many_credentials_round_trip() {
    let dir = TempDir::new().unwrap();
    let gate = open(&dir);

    for (email, password) in [
        ("a@b.c", "x"),
        ("first.last+tag@example.org", "with:colons:inside"),
        ("unicode-ü@example.de", "pässwörd"),
        ("no-at-sign", "pw"),
        ("test@demo.com", "not-password"),
    ] {
        gate.login(email, password).await.unwrap();
        let identity = gate.current_identity().await.unwrap().unwrap();
        assert_eq!(identity.email, email);
    }
}
