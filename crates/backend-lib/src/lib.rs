// ============================
// ridesafe-backend/src/lib.rs
// ============================
//! Session gate and HTTP shell for the `RideSafe` demo site.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod token;
pub mod validation;

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::auth::{AuthService, DemoAuth, GatePolicy, SessionGate};
use crate::config::Settings;
use crate::storage::CookieStorage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential checker
    pub auth: Arc<dyn AuthService>,
    /// Loaded settings
    pub settings: Arc<Settings>,
    /// Gate tunables derived from the settings
    pub policy: GatePolicy,
}

impl AppState {
    /// Create a new application state backed by the demo credential check
    pub fn new(settings: Settings) -> Self {
        let auth = Arc::new(DemoAuth::new(settings.login_delay()));
        Self::with_auth(settings, auth)
    }

    /// Create a new application state with a custom credential check
    pub fn with_auth(settings: Settings, auth: Arc<dyn AuthService>) -> Self {
        let policy = GatePolicy::from(&settings);
        Self {
            auth,
            settings: Arc::new(settings),
            policy,
        }
    }

    /// Gate over the cookies of one request
    pub fn gate_for(&self, headers: &HeaderMap) -> SessionGate<CookieStorage> {
        SessionGate::new(
            CookieStorage::from_headers(headers, self.settings.cookie_secure),
            Arc::clone(&self.auth),
            self.policy.clone(),
        )
    }
}
