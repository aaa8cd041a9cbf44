// ================
// common/src/lib.rs
// ================
//! Common types shared between the `RideSafe` server and its clients.
//! This module defines the page routes, the access decision, the display
//! identity and the JSON payloads exchanged with the form endpoints.

use serde::{Deserialize, Serialize};

/// Path of the public landing page
pub const LANDING_PATH: &str = "/";
/// Path of the public signup page
pub const SIGNUP_PATH: &str = "/signup";
/// Path of the public login page
pub const LOGIN_PATH: &str = "/login";
/// Path of the protected home page
pub const HOME_PATH: &str = "/home";

/// A page the presentation layer can navigate to
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Landing,
    Signup,
    Login,
    Home,
    /// Link targets with no backing page (`/profile`, `/qr`, ...)
    Unknown(String),
}

impl Route {
    /// Resolve a request path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            SIGNUP_PATH => Route::Signup,
            LOGIN_PATH => Route::Login,
            HOME_PATH => Route::Home,
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Landing => LANDING_PATH,
            Route::Signup => SIGNUP_PATH,
            Route::Login => LOGIN_PATH,
            Route::Home => HOME_PATH,
            Route::Unknown(path) => path,
        }
    }

    /// Whether the page requires a session token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home)
    }
}

/// Outcome of the access check performed when a page loads
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum RouteDecision {
    /// Render the requested page
    Allow,
    /// Navigate elsewhere. With `replace` set the history entry of the
    /// requested page is overwritten so "back" does not return to it.
    RedirectTo { path: String, replace: bool },
}

impl RouteDecision {
    pub fn redirect_replace(route: &Route) -> Self {
        RouteDecision::RedirectTo {
            path: route.path().to_string(),
            replace: true,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allow)
    }
}

/// Display-only projection of a session token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Payload of the signup form
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Payload of the login form
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful form submission: where the presentation layer goes next
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormReply {
    /// Inline confirmation for forms that stay on the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Target page, if the form navigates away
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub replace: bool,
}

impl FormReply {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            redirect: None,
            replace: false,
        }
    }

    pub fn redirect(route: &Route) -> Self {
        Self {
            message: None,
            redirect: Some(route.path().to_string()),
            replace: true,
        }
    }
}

/// Static page descriptor handed to the presentation layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub page: Route,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// Error body returned by the form endpoints
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
