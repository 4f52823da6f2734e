//! Repositories
//!
//! SQL access per entity. Every read that can leak another company's rows
//! takes a `Scope` and narrows the query with it.

pub mod account_repository;
pub mod company_repository;
pub mod document_repository;
pub mod worker_repository;

pub use account_repository::AccountRepository;
pub use company_repository::CompanyRepository;
pub use document_repository::{DocumentFilters, DocumentRepository};
pub use worker_repository::{WorkerFilters, WorkerRepository};
