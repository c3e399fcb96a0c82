//! Cookie session settings read from the environment.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SESSION_KEY_FILE` | path to at least 64 bytes of key material |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` |
//! | `SESSION_ALLOW_EPHEMERAL` | permit a generated key when the file is unusable |
//!
//! Debug builds fall back to defaults with a warning. Release builds insist on
//! every variable and refuse ephemeral keys, since a generated key drops
//! every flash message on restart and differs between replicas.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
const MIN_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";

/// Whether lenient defaults apply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid values fall back to defaults.
    Debug,
    /// Every variable is required.
    Release,
}

impl BuildMode {
    /// Mode matching how this binary was compiled.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    /// Signing and encryption key for the session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Always `Lax`: the flash cookie must survive same-site redirects.
    pub same_site: SameSite,
}

/// Reasons session settings cannot be built.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A release build found the variable unset.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// The variable is not a recognised boolean.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds fewer bytes than required.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Ephemeral keys were requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read session settings through `env`.
///
/// # Errors
///
/// Release builds fail on missing or invalid variables, on an unreadable or
/// short key file, and when ephemeral keys are requested.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag_from_env(env, COOKIE_SECURE_ENV, mode, true)?;
    let allow_ephemeral = flag_from_env(env, ALLOW_EPHEMERAL_ENV, mode, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = key_from_env(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn flag_from_env<E: Env>(
    env: &E,
    name: &'static str,
    mode: BuildMode,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode == BuildMode::Release {
            return Err(SessionConfigError::MissingEnv { name });
        }
        warn!(variable = name, default = debug_default, "session flag not set");
        return Ok(debug_default);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode == BuildMode::Debug => {
            warn!(variable = name, %value, default = debug_default, "invalid session flag");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    let fallback_ok = mode == BuildMode::Debug || allow_ephemeral;

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if fallback_ok => {
            warn!(path = %path.display(), error = %source, "using temporary session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    if length < MIN_KEY_LEN {
        bytes.zeroize();
        if fallback_ok {
            warn!(path = %path.display(), length, "session key too short; using temporary key");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: MIN_KEY_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use env_lock::lock_env;
    use mockable::{DefaultEnv, MockEnv};
    use rstest::rstest;

    fn env_with(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |name| vars.get(name).cloned());
        env
    }

    struct KeyFile(PathBuf);

    impl KeyFile {
        fn with_len(len: usize) -> Self {
            let path =
                std::env::temp_dir().join(format!("quiz-session-key-{}", uuid::Uuid::new_v4()));
            std::fs::write(&path, vec![b'k'; len]).expect("write key file");
            Self(path)
        }

        fn path(&self) -> &str {
            self.0.to_str().expect("utf-8 temp path")
        }
    }

    impl Drop for KeyFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case("TRUE", Some(true))]
    #[case(" no ", Some(false))]
    #[case("0", Some(false))]
    #[case("maybe", None)]
    fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    fn release_accepts_complete_configuration() {
        let key = KeyFile::with_len(64);
        let env = env_with(&[
            (KEY_FILE_ENV, key.path()),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);

        let settings =
            session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    fn release_rejects_missing_secure_flag() {
        let key = KeyFile::with_len(64);
        let env = env_with(&[(KEY_FILE_ENV, key.path()), (ALLOW_EPHEMERAL_ENV, "0")]);

        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("missing flag rejected");
        assert!(matches!(
            err,
            SessionConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV
            }
        ));
    }

    #[rstest]
    fn release_rejects_short_key() {
        let key = KeyFile::with_len(16);
        let env = env_with(&[
            (KEY_FILE_ENV, key.path()),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);

        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("short key rejected");
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys() {
        let env = env_with(&[(COOKIE_SECURE_ENV, "1"), (ALLOW_EPHEMERAL_ENV, "1")]);

        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("ephemeral rejected");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn debug_falls_back_to_defaults() {
        let env = env_with(&[
            (KEY_FILE_ENV, "/nonexistent/quiz-session-key"),
            (COOKIE_SECURE_ENV, "sometimes"),
        ]);

        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
        assert!(settings.cookie_secure);
    }

    #[rstest]
    fn debug_honours_explicit_insecure_cookie() {
        let env = env_with(&[
            (KEY_FILE_ENV, "/nonexistent/quiz-session-key"),
            (COOKIE_SECURE_ENV, "0"),
        ]);

        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
        assert!(!settings.cookie_secure);
    }

    #[rstest]
    fn process_environment_is_read_in_release_mode() {
        let _guard = lock_env([
            (KEY_FILE_ENV, None::<String>),
            (COOKIE_SECURE_ENV, None),
            (ALLOW_EPHEMERAL_ENV, None),
        ]);

        let err = session_settings_from_env(&DefaultEnv::new(), BuildMode::Release)
            .err()
            .expect("unset variables rejected");
        assert!(matches!(
            err,
            SessionConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV
            }
        ));
    }
}
