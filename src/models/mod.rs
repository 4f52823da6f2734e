//! Data models
//!
//! Row types mapping the PostgreSQL schema, the enums stored in it, and the
//! validated form values the controllers write back.

pub mod company;
pub mod document;
pub mod renewal;
pub mod user;
pub mod worker;
