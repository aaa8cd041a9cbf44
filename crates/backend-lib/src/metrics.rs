// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const SIGNUP_SUCCESS: &str = "auth.signup.success";
pub const SIGNUP_FAILURE: &str = "auth.signup.failure";
pub const LOGOUT: &str = "auth.logout";
pub const GATE_REDIRECT: &str = "gate.redirect";
