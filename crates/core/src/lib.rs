//! Core library for TaskTabs
//!
//! This crate contains the core business logic, including:
//! - Domain model (tabs, categories, tasks)
//! - The `TaskStore` facade with backend and fallback implementations
//! - Legacy task import reconciliation

pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod palette;
pub mod store;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
