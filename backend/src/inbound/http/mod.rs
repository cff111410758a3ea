//! HTTP inbound adapter serving the server-rendered pages.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod flash;
pub mod health;
pub mod locations;
pub mod preferences;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

pub use error::ApiResult;

/// `302 Found` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Register every page handler. Callers wrap the scope with session
/// middleware and provide [`state::HttpState`] as app data.
///
/// ```
/// use actix_web::App;
/// use weatherdesk::inbound::http::configure_pages;
///
/// let _app = App::new().configure(configure_pages);
/// ```
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login_page)
        .service(users::login)
        .service(users::logout)
        .service(dashboard::dashboard)
        .service(preferences::set_units)
        .service(locations::add_location)
        .service(locations::delete_location);
}
