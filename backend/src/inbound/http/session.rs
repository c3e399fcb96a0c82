//! One-shot flash messages carried in the cookie session.
//!
//! A redirecting handler stores a message; the next page that renders takes
//! it, which removes it from the session so it is shown once.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Slot a flash message is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// Insert or update succeeded.
    Complete,
    /// Delete succeeded.
    DeleteComplete,
}

/// Messages pending for the next render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Set after a registration or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<String>,
    /// Set after a deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delcomplete: Option<String>,
}

/// Session wrapper exposing flash operations to handlers.
#[derive(Clone)]
pub struct FlashMessages(Session);

impl FlashMessages {
    /// Wrap an extracted session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue `message` for the next render, replacing any pending message of
    /// the same kind.
    pub fn set(&self, kind: FlashKind, message: impl Into<String>) -> Result<(), Error> {
        let mut flash = self.peek()?;
        let message = Some(message.into());
        match kind {
            FlashKind::Complete => flash.complete = message,
            FlashKind::DeleteComplete => flash.delcomplete = message,
        }
        self.0
            .insert(FLASH_KEY, flash)
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return every pending message.
    pub fn take(&self) -> Result<Flash, Error> {
        let flash = self.peek()?;
        self.0.remove(FLASH_KEY);
        Ok(flash)
    }

    fn peek(&self) -> Result<Flash, Error> {
        match self.0.get::<Flash>(FLASH_KEY) {
            Ok(flash) => Ok(flash.unwrap_or_default()),
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable flash payload");
                Ok(Flash::default())
            }
        }
    }
}

impl FromRequest for FlashMessages {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashMessages::new) })
    }
}
