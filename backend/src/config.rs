//! Application settings loaded via OrthoConfig.
//!
//! Values come from `QUIZ_*` environment variables, command-line flags, or a
//! configuration file. Without `database_url` the server keeps quizzes in
//! memory.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the quiz server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QUIZ")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen address; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Listen port; defaults to 8080.
    pub port: Option<u16>,
    /// Apply embedded migrations before serving. Unset means `true`.
    pub run_migrations: Option<bool>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Seconds a request may wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Whether pending migrations run at startup. Unset means `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_size(max);
        }
        config = config.with_min_idle(self.db_min_idle);
        if let Some(secs) = self.db_connect_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "QUIZ_DATABASE_URL",
        "QUIZ_HOST",
        "QUIZ_PORT",
        "QUIZ_RUN_MIGRATIONS",
        "QUIZ_DB_MAX_CONNECTIONS",
        "QUIZ_DB_MIN_IDLE",
        "QUIZ_DB_CONNECT_TIMEOUT_SECS",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("quiz-backend")]).expect("settings load")
    }

    #[rstest]
    fn defaults_select_in_memory_storage() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert!(settings.database_url().is_none());
        assert!(settings.run_migrations());
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("QUIZ_DATABASE_URL", Some("postgres://localhost/quiz".to_owned())),
            ("QUIZ_HOST", Some("127.0.0.1".to_owned())),
            ("QUIZ_PORT", Some("9090".to_owned())),
            ("QUIZ_RUN_MIGRATIONS", Some("false".to_owned())),
            ("QUIZ_DB_MAX_CONNECTIONS", Some("3".to_owned())),
            ("QUIZ_DB_MIN_IDLE", Some("1".to_owned())),
            ("QUIZ_DB_CONNECT_TIMEOUT_SECS", Some("4".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.database_url(), Some("postgres://localhost/quiz"));
        assert!(!settings.run_migrations());
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(
            settings.pool_config(),
            Some(
                PoolConfig::new("postgres://localhost/quiz")
                    .with_max_size(3)
                    .with_min_idle(Some(1))
                    .with_connection_timeout(Duration::from_secs(4))
            )
        );
    }

    #[rstest]
    fn pool_defaults_apply_when_only_url_is_set() {
        let _guard = lock_env(VARS.map(|name| {
            let value =
                (name == "QUIZ_DATABASE_URL").then(|| "postgres://localhost/quiz".to_owned());
            (name, value)
        }));

        assert_eq!(
            load().pool_config(),
            Some(PoolConfig::new("postgres://localhost/quiz"))
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    fn migrations_run_unless_disabled(#[case] raw: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "QUIZ_RUN_MIGRATIONS")
                .then(|| raw.map(str::to_owned))
                .flatten();
            (name, value)
        }));

        assert_eq!(load().run_migrations(), expected);
    }

    #[rstest]
    fn blank_database_url_is_ignored() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "QUIZ_DATABASE_URL").then(|| "  ".to_owned());
            (name, value)
        }));

        let settings = load();
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().is_none());
    }
}
