//! Services module
//!
//! Business rules that do not touch the database: expiry classification,
//! renewal application, access scoping, pagination, exports and the
//! reminder report.

pub mod access_scope;
pub mod csv_export;
pub mod expiry_service;
pub mod pagination;
pub mod reminder_service;
pub mod renewal_service;
