//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal only with the signed-in
//! user id and the flash queue.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::{Flash, FlashLevel};
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as the signed-in user.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user id, if any.
    ///
    /// A value that no longer validates is logged and treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Forget the signed-in user. Pending flashes survive.
    pub fn clear_user(&self) {
        self.0.remove(USER_ID_KEY);
    }

    /// Queue a notice for the next rendered page.
    pub fn push_flash(&self, level: FlashLevel, message: impl Into<String>) -> Result<(), Error> {
        let mut flashes = self.pending_flashes()?;
        flashes.push(Flash::new(level, message));
        self.0
            .insert(FLASHES_KEY, flashes)
            .map_err(|error| Error::internal(format!("failed to store flash: {error}")))
    }

    /// Drain every queued notice.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let flashes = self.pending_flashes()?;
        if !flashes.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        Ok(flashes)
    }

    fn pending_flashes(&self) -> Result<Vec<Flash>, Error> {
        match self.0.get::<Vec<Flash>>(FLASHES_KEY) {
            Ok(flashes) => Ok(flashes.unwrap_or_default()),
            Err(error) => {
                // An undecodable queue is dropped rather than failing the page.
                warn!("discarding unreadable flash queue: {error}");
                self.0.remove(FLASHES_KEY);
                Ok(Vec::new())
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
