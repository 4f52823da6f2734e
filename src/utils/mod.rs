//! Shared utilities
//!
//! Error handling, form validation and JWT helpers.

pub mod errors;
pub mod jwt;
pub mod validation;
