//! Default units handler.
//!
//! ```text
//! POST /set_units  default_units=imperial
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::{ErrorCode, UnitSystem};
use crate::inbound::http::auth::{Gate, require_user, stale_session};
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::INVALID_UNITS_FLASH;
use crate::inbound::http::{ApiResult, redirect};

/// Form body for `POST /set_units`. A missing value means metric.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UnitsForm {
    pub default_units: Option<String>,
}

/// Persist the signed-in user's default units.
#[post("/set_units")]
pub async fn set_units(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<UnitsForm>,
) -> ApiResult<HttpResponse> {
    let user = match require_user(&session, state.accounts.as_ref()).await? {
        Gate::Active(user) => user,
        Gate::Redirect(response) => return Ok(response),
    };

    let raw = form.into_inner().default_units;
    let Ok(units) = raw.as_deref().unwrap_or("metric").trim().parse::<UnitSystem>() else {
        session.push_flash(FlashLevel::Error, INVALID_UNITS_FLASH)?;
        return Ok(redirect("/dashboard"));
    };

    match state.accounts.set_units(&user.id, units).await {
        Ok(()) => {}
        // Removed between the gate and the write.
        Err(error) if error.code() == ErrorCode::NotFound => {
            return stale_session(&session, &user.id);
        }
        Err(error) => return Err(error),
    }
    session.push_flash(
        FlashLevel::Success,
        format!("Default units updated to {units}."),
    )?;
    Ok(redirect("/dashboard"))
}
