//! Settings consumed by [`super::create_server`].

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use quiz_backend::inbound::http::session_config::SessionSettings;

/// Cookie session and listener settings for the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}
