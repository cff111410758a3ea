//! Dashboard page.
//!
//! ```text
//! GET /dashboard
//! GET /dashboard?loc=<location id>
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::LocationId;
use crate::domain::ports::WeatherOutcome;
use crate::inbound::http::auth::{Gate, require_user};
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, views};

/// Query string for `GET /dashboard`.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub loc: Option<String>,
}

impl DashboardParams {
    fn selected(self) -> Option<LocationId> {
        self.loc
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(LocationId::new)
    }
}

/// List saved locations and, when one is selected, its current weather.
///
/// A weather failure becomes an error notice on this same page.
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DashboardParams>,
) -> ApiResult<HttpResponse> {
    let user = match require_user(&session, state.accounts.as_ref()).await? {
        Gate::Active(user) => user,
        Gate::Redirect(response) => return Ok(response),
    };

    let view = state
        .dashboard
        .load(&user, params.into_inner().selected())
        .await?;
    if let Some(WeatherOutcome::Unavailable { message }) = &view.weather {
        session.push_flash(FlashLevel::Error, message.clone())?;
    }

    let flashes = session.take_flashes()?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::dashboard_page(&user, &view, &flashes)))
}
