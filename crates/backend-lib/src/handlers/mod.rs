//! HTTP handlers: page loads and form submissions.

pub mod forms;
pub mod pages;
