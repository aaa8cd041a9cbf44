// ============================
// crates/backend-lib/src/handlers/pages.rs
// ============================
//! Page loads. Rendering is left to the presentation layer; these
//! handlers only describe which page to show and run the access check.
use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use ridesafe_common::{PageView, Route, RouteDecision};

use crate::{error::AppError, AppState};

fn public(page: Route) -> Json<PageView> {
    Json(PageView {
        page,
        identity: None,
    })
}

pub async fn landing() -> Json<PageView> {
    public(Route::Landing)
}

pub async fn signup() -> Json<PageView> {
    public(Route::Signup)
}

pub async fn login() -> Json<PageView> {
    public(Route::Login)
}

/// Protected home page. Anonymous visitors get a `303 See Other` to the
/// login page, which browsers follow without keeping `/home` in history.
pub async fn home(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let gate = state.gate_for(&headers);

    match gate.decide(&Route::Home).await? {
        RouteDecision::Allow => {
            let identity = gate.current_identity().await?;
            Ok(Json(PageView {
                page: Route::Home,
                identity,
            })
            .into_response())
        },
        RouteDecision::RedirectTo { path, .. } => Ok(Redirect::to(&path).into_response()),
    }
}
