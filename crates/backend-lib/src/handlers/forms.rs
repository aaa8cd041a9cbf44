// ============================
// crates/backend-lib/src/handlers/forms.rs
// ============================
//! Form endpoints backing the signup, login and home pages.
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use ridesafe_common::{FormReply, Identity, LoginForm, Route, RouteDecision, SignupForm};
use serde::Deserialize;

use crate::auth::{AFTER_LOGIN, AFTER_LOGOUT};
use crate::storage::CookieStorage;
use crate::{error::AppError, AppState};

/// Confirmation shown after a successful signup
pub const SIGNUP_CONFIRMATION: &str = "Account created (demo).";

/// Attach the `Set-Cookie` headers journaled by `storage`
fn with_cookies(storage: &CookieStorage, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    for cookie in storage.set_cookie_headers() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<SignupForm>,
) -> Result<Json<FormReply>, AppError> {
    let gate = state.gate_for(&headers);
    gate.signup(&form.username, &form.email, &form.password, &form.confirm_password)
        .await?;
    Ok(Json(FormReply::message(SIGNUP_CONFIRMATION)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<LoginForm>,
) -> Result<Response, AppError> {
    let gate = state.gate_for(&headers);
    gate.login(&form.email, &form.password).await?;
    Ok(with_cookies(gate.storage(), Json(FormReply::redirect(&AFTER_LOGIN))))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let gate = state.gate_for(&headers);
    gate.logout().await?;
    Ok(with_cookies(gate.storage(), Json(FormReply::redirect(&AFTER_LOGOUT))))
}

pub async fn identity(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Identity>, AppError> {
    let gate = state.gate_for(&headers);
    let identity = gate
        .current_identity()
        .await?
        .ok_or(AppError::Unauthenticated)?;
    Ok(Json(identity))
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

/// Access decision for an arbitrary path, for client-side routers
pub async fn route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteDecision>, AppError> {
    let gate = state.gate_for(&headers);
    let decision = gate.decide(&Route::from_path(&query.path)).await?;
    Ok(Json(decision))
}
