// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

mod service;
mod service_impl;
pub mod session;

pub use service::{AuthError, AuthService};
pub use service_impl::{DemoAuth, DEMO_EMAIL, DEMO_PASSWORD, DEMO_TOKEN};
pub use session::{
    decide_route, GatePolicy, SessionGate, SessionState, AFTER_LOGIN, AFTER_LOGOUT, AUTH_TOKEN_KEY,
};
