// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! The session gate: login/logout side effects, identity lookup and page
//! access decisions, all over an injected [`Storage`].
use std::{sync::Arc, time::Duration};

use metrics::counter;
use ridesafe_common::{Identity, Route, RouteDecision};
use tracing::{debug, info, warn};

use crate::auth::{AuthError, AuthService};
use crate::config::Settings;
use crate::metrics::{GATE_REDIRECT, LOGIN_FAILURE, LOGIN_SUCCESS, LOGOUT, SIGNUP_FAILURE, SIGNUP_SUCCESS};
use crate::storage::{Storage, StorageError};
use crate::token::{identity_from_token, Token};
use crate::validation::{validate_login, validate_signup, ValidationError, MIN_PASSWORD_LENGTH};

/// Storage key holding the session token
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Where the presentation layer goes after a successful login
pub const AFTER_LOGIN: Route = Route::Home;
/// Where the presentation layer goes after logout or a denied page
pub const AFTER_LOGOUT: Route = Route::Login;

/// Whether a token is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Tunables of the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    pub signup_delay: Duration,
    pub min_password_length: usize,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            signup_delay: Duration::from_millis(1000),
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl From<&Settings> for GatePolicy {
    fn from(settings: &Settings) -> Self {
        Self {
            signup_delay: settings.signup_delay(),
            min_password_length: settings.min_password_length,
        }
    }
}

/// Access decision for `route` given the stored token, if any.
/// Only protected pages are guarded; an anonymous visitor is sent to the
/// login page with the history entry replaced.
pub fn decide_route(route: &Route, token: Option<&str>) -> RouteDecision {
    let authenticated = token.is_some_and(|t| !t.is_empty());
    if route.is_protected() && !authenticated {
        RouteDecision::redirect_replace(&AFTER_LOGOUT)
    } else {
        RouteDecision::Allow
    }
}

/// Session gate over a storage capability and a credential checker
pub struct SessionGate<S> {
    storage: S,
    auth: Arc<dyn AuthService>,
    policy: GatePolicy,
}

impl<S: Storage> SessionGate<S> {
    pub fn new(storage: S, auth: Arc<dyn AuthService>, policy: GatePolicy) -> Self {
        Self {
            storage,
            auth,
            policy,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored token. An empty value counts as no token.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(AUTH_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty()))
    }

    pub async fn state(&self) -> Result<SessionState, StorageError> {
        Ok(match self.token().await? {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Anonymous,
        })
    }

    /// Validate a signup form and simulate account creation. Does not sign
    /// the new user in.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ValidationError> {
        if let Err(err) = validate_signup(
            username,
            email,
            password,
            confirm_password,
            self.policy.min_password_length,
        ) {
            counter!(SIGNUP_FAILURE).increment(1);
            debug!(error = %err, "signup rejected");
            return Err(err);
        }

        tokio::time::sleep(self.policy.signup_delay).await;

        counter!(SIGNUP_SUCCESS).increment(1);
        info!("account created (demo)");
        Ok(())
    }

    /// Check credentials and store the issued token
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, AuthError> {
        let email = match validate_login(email, password) {
            Ok(email) => email,
            Err(_) => {
                counter!(LOGIN_FAILURE).increment(1);
                debug!("login rejected: missing fields");
                return Err(AuthError::MissingFields);
            },
        };

        let token = match self.auth.login(email, password).await {
            Ok(token) => token,
            Err(err) => {
                counter!(LOGIN_FAILURE).increment(1);
                warn!(error = %err, "login failed");
                return Err(err);
            },
        };

        self.storage.set(AUTH_TOKEN_KEY, token.as_str()).await?;

        counter!(LOGIN_SUCCESS).increment(1);
        info!("login succeeded");
        Ok(token)
    }

    /// Drop the stored token. Safe to call when signed out.
    pub async fn logout(&self) -> Result<(), StorageError> {
        if self.token().await?.is_some() {
            counter!(LOGOUT).increment(1);
            info!("logged out");
        }
        self.storage.remove(AUTH_TOKEN_KEY).await
    }

    /// Identity of the signed-in visitor, `None` when anonymous. Tokens
    /// that do not decode yield the fallback identity.
    pub async fn current_identity(&self) -> Result<Option<Identity>, StorageError> {
        Ok(self.token().await?.map(|t| identity_from_token(&t)))
    }

    /// Access decision for a page load
    pub async fn decide(&self, route: &Route) -> Result<RouteDecision, StorageError> {
        let token = self.token().await?;
        let decision = decide_route(route, token.as_deref());
        if !decision.is_allowed() {
            counter!(GATE_REDIRECT).increment(1);
            debug!(path = route.path(), "anonymous visitor redirected to login");
        }
        Ok(decision)
    }
}
