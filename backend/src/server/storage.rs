//! Select and prepare the quiz store.

use std::sync::Arc;

use tracing::{info, warn};

use quiz_backend::config::AppSettings;
use quiz_backend::domain::QuizService;
use quiz_backend::inbound::http::state::HttpState;
use quiz_backend::outbound::memory::InMemoryQuizRepository;
use quiz_backend::outbound::persistence::{DbPool, DieselQuizRepository, run_migrations};

/// Build handler state over PostgreSQL when a database URL is configured,
/// otherwise over the in-memory store.
///
/// Pending migrations run first unless disabled.
///
/// # Errors
/// Returns an I/O error when migrations fail or the pool cannot be built.
pub async fn build_http_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    let Some(pool_config) = settings.pool_config() else {
        warn!("no database configured; quizzes are kept in memory");
        let service = QuizService::new(Arc::new(InMemoryQuizRepository::new()));
        return Ok(HttpState::from_service(Arc::new(service)));
    };

    if settings.run_migrations() {
        let migration_url = pool_config.database_url().to_owned();
        tokio::task::spawn_blocking(move || run_migrations(&migration_url))
            .await
            .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
            .map_err(std::io::Error::other)?;
        info!("database schema up to date");
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!("using PostgreSQL quiz store");

    let service = QuizService::new(Arc::new(DieselQuizRepository::new(pool)));
    Ok(HttpState::from_service(Arc::new(service)))
}
