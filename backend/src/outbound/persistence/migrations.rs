//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_port_error! {
    /// Failures while bringing the schema up to date.
    pub enum MigrationError {
        /// The database could not be reached.
        Connect { message: String } => "migration connection failed: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "migration failed: {message}",
    }
}

/// Apply every pending migration to the database at `database_url`.
///
/// Blocking; call from `spawn_blocking` inside an async context.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection or a migration fails.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::connect(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::apply(err.to_string()))?;
    for version in &applied {
        info!(%version, "migration applied");
    }
    Ok(())
}
