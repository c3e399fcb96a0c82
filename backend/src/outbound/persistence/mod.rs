//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs and the table definition stay private to this module; only
//! the pool, the repository, and the migration runner are exported.
//!
//! ```ignore
//! use quiz_backend::outbound::persistence::{DbPool, DieselQuizRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/quiz")).await?;
//! let repository = DieselQuizRepository::new(pool);
//! ```

mod diesel_quiz_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_quiz_repository::DieselQuizRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
