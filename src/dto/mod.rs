//! Request and response bodies

pub mod auth_dto;
pub mod company_dto;
pub mod dashboard_dto;
pub mod document_dto;
pub mod worker_dto;
