//! PostgreSQL access layer for foreman.
//!
//! Provides pool construction, embedded migrations, row models, and the
//! parameterized query functions used by the HTTP layer.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
