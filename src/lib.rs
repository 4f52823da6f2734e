//! Foreign-worker permit tracker
//!
//! Companies, their foreign workers, and the permits those workers hold
//! (RPTKA, IMTA, VISA, KITAS, SKTT, passport), with expiry reminders,
//! renewal history and per-company access for client users.

pub mod cli;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;
