// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use ridesafe_common::{HOME_PATH, LANDING_PATH, LOGIN_PATH, SIGNUP_PATH};
use tower_http::trace::TraceLayer;

use crate::handlers::{forms, pages};
use crate::AppState;

/// Create the router: the four pages plus the JSON form endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(LANDING_PATH, get(pages::landing))
        .route(SIGNUP_PATH, get(pages::signup))
        .route(LOGIN_PATH, get(pages::login))
        .route(HOME_PATH, get(pages::home))
        .route("/api/signup", post(forms::signup))
        .route("/api/login", post(forms::login))
        .route("/api/logout", post(forms::logout))
        .route("/api/identity", get(forms::identity))
        .route("/api/route", get(forms::route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
