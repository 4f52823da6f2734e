//! Controllers
//!
//! Request-level rules on top of the repositories: scoping, existence
//! checks, and the redirects that stand in for a silent refusal.

use axum::response::{IntoResponse, Redirect, Response};

pub mod auth_controller;
pub mod company_controller;
pub mod dashboard_controller;
pub mod document_controller;
pub mod export_controller;
pub mod worker_controller;

pub const COMPANY_LIST: &str = "/api/companies";
pub const DOCUMENT_LIST: &str = "/api/documents";

/// Result of a write that the caller may not be allowed to perform
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    /// Nothing was written; send the caller back to a list
    Redirect(&'static str),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Redirect(to) => Outcome::Redirect(to),
        }
    }
}

impl<T: IntoResponse> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Done(value) => value.into_response(),
            Outcome::Redirect(to) => Redirect::to(to).into_response(),
        }
    }
}
