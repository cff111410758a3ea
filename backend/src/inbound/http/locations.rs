//! Saved location handlers.
//!
//! ```text
//! POST /add_location          city=Paris&country_code=fr&nickname=Home
//! POST /delete_location/{id}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::{LocationDraft, LocationId};
use crate::inbound::http::auth::{Gate, require_user};
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, redirect};

/// Form body for `POST /add_location`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddLocationForm {
    pub city: String,
    pub country_code: String,
    pub nickname: String,
}

/// Save a new location for the signed-in user.
#[post("/add_location")]
pub async fn add_location(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AddLocationForm>,
) -> ApiResult<HttpResponse> {
    let user = match require_user(&session, state.accounts.as_ref()).await? {
        Gate::Active(user) => user,
        Gate::Redirect(response) => return Ok(response),
    };

    let AddLocationForm {
        city,
        country_code,
        nickname,
    } = form.into_inner();
    let Ok(draft) = LocationDraft::try_new(&city, &country_code, &nickname) else {
        session.push_flash(
            FlashLevel::Error,
            "City, country code, and nickname are required.",
        )?;
        return Ok(redirect("/dashboard"));
    };

    let location = state.locations.add(&user.id, draft).await?;
    session.push_flash(
        FlashLevel::Success,
        format!("Location '{}' added.", location.nickname),
    )?;
    Ok(redirect("/dashboard"))
}

/// Delete one of the signed-in user's locations. Unknown ids are ignored.
#[post("/delete_location/{id}")]
pub async fn delete_location(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = match require_user(&session, state.accounts.as_ref()).await? {
        Gate::Active(user) => user,
        Gate::Redirect(response) => return Ok(response),
    };

    let id = LocationId::new(path.into_inner());
    state.locations.delete(&user.id, &id).await?;
    session.push_flash(FlashLevel::Success, "Location deleted.")?;
    Ok(redirect("/dashboard"))
}
