//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET  /        login form
//! POST /        user_id=ada&name=Ada&default_units=metric
//! GET  /logout
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{LoginOutcome, LoginRequest};
use crate::domain::{ErrorCode, UnitSystem, UserId, UserValidationError};
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect, views};

pub(crate) const INVALID_UNITS_FLASH: &str = "Invalid units selection.";

/// Form body for `POST /`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub user_id: String,
    pub name: String,
    pub default_units: String,
}

/// Render the login form. Signed-in users see it too.
#[get("/")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::login_page(&flashes)))
}

/// Sign in, creating the user on first sight.
#[post("/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        user_id,
        name,
        default_units,
    } = form.into_inner();

    let user_id = match UserId::new(&user_id) {
        Ok(id) => id,
        Err(UserValidationError::EmptyId) => {
            session.push_flash(FlashLevel::Message, "Please enter a user ID.")?;
            return Ok(redirect("/"));
        }
        Err(error) => {
            session.push_flash(FlashLevel::Error, format!("Invalid user ID: {error}."))?;
            return Ok(redirect("/"));
        }
    };
    let default_units = match default_units.trim() {
        "" => Ok(UnitSystem::default()),
        raw => raw.parse::<UnitSystem>(),
    };

    let attempt = state
        .accounts
        .login(LoginRequest {
            user_id,
            display_name: Some(name).filter(|name| !name.trim().is_empty()),
            default_units,
        })
        .await;
    let outcome = match attempt {
        Ok(outcome) => outcome,
        Err(error) if error.code() == ErrorCode::InvalidRequest => {
            debug!(error = %error, "rejected new user");
            session.push_flash(FlashLevel::Error, INVALID_UNITS_FLASH)?;
            return Ok(redirect("/"));
        }
        Err(error) => return Err(error),
    };
    let notice = match &outcome {
        LoginOutcome::Created(_) => "New user created.",
        LoginOutcome::Returning(_) => "Welcome back!",
    };
    session.persist_user(&outcome.user().id)?;
    session.push_flash(FlashLevel::Success, notice)?;
    Ok(redirect("/dashboard"))
}

/// Clear the session user. Safe to call while signed out.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear_user();
    session.push_flash(FlashLevel::Info, "You have been logged out.")?;
    Ok(redirect("/"))
}

#[cfg(test)]
mod tests;
