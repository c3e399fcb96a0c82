//! Outbound adapters implementing the quiz repository port.
//!
//! - **persistence**: PostgreSQL via Diesel and a bb8 pool.
//! - **memory**: a process-local map used when no database is configured.
//!
//! Adapters translate between storage rows and [`crate::domain::Quiz`] and
//! carry no business rules.

pub mod memory;
pub mod persistence;
