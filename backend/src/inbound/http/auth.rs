//! Session gate shared by the signed-in pages.
//!
//! A request with no user id in the session goes back to the login page
//! silently. A user id that no longer resolves clears the session first and
//! explains why.

use actix_web::HttpResponse;
use tracing::info;

use crate::domain::ports::AccountCommand;
use crate::domain::{Error, User, UserId};

use super::flash::FlashLevel;
use super::redirect;
use super::session::SessionContext;

pub(crate) const USER_NOT_FOUND_FLASH: &str = "User not found. Please log in again.";

/// Result of checking the session for a signed-in user.
#[derive(Debug)]
pub enum Gate {
    Active(User),
    Redirect(HttpResponse),
}

/// Resolve the session user or produce the redirect that replaces the page.
pub async fn require_user(
    session: &SessionContext,
    accounts: &dyn AccountCommand,
) -> Result<Gate, Error> {
    let Some(id) = session.user_id()? else {
        return Ok(Gate::Redirect(redirect("/")));
    };
    match accounts.current_user(&id).await? {
        Some(user) => Ok(Gate::Active(user)),
        None => stale_session(session, &id).map(Gate::Redirect),
    }
}

/// Forget a session whose user has disappeared and send it to login.
pub(crate) fn stale_session(session: &SessionContext, id: &UserId) -> Result<HttpResponse, Error> {
    info!(user_id = %id, "session refers to unknown user; clearing");
    session.clear_user();
    session.push_flash(FlashLevel::Message, USER_NOT_FOUND_FLASH)?;
    Ok(redirect("/"))
}
