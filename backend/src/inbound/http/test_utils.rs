//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};

use crate::domain::ports::WeatherSource;
use crate::domain::test_support::fixture_clock;
use crate::domain::{AccountService, DashboardService, LocationService};
use crate::outbound::memory::InMemoryRecordStore;

use super::configure_pages;
use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie written by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Latest session cookie: the one `res` wrote, else `previous`.
pub fn next_cookie<B>(previous: Cookie<'static>, res: &ServiceResponse<B>) -> Cookie<'static> {
    session_cookie(res).unwrap_or(previous)
}

/// `Location` header of a redirect.
pub fn location_header<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Real services over one in-memory store and the given weather source.
pub fn memory_state<W>(weather: W) -> (web::Data<HttpState>, Arc<InMemoryRecordStore>)
where
    W: WeatherSource + 'static,
{
    let store = Arc::new(InMemoryRecordStore::new());
    let clock = fixture_clock();
    let state = HttpState::from(HttpStatePorts {
        accounts: Arc::new(AccountService::new(store.clone(), clock.clone())),
        locations: Arc::new(LocationService::new(store.clone(), clock)),
        dashboard: Arc::new(DashboardService::new(store.clone(), Arc::new(weather))),
    });
    (web::Data::new(state), store)
}

/// Every page handler behind a test session middleware.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .configure(configure_pages)
}

/// `POST /` signing in as `user_id` with default fields.
pub fn login_form(user_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/")
        .set_form([("user_id", user_id), ("name", ""), ("default_units", "metric")])
}

/// Sign in as `user_id` and return the resulting session cookie.
pub async fn sign_in<S>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, login_form(user_id).to_request()).await;
    session_cookie(&res).expect("login sets a session cookie")
}

/// Render `GET /` with `cookie`, draining its flashes into the page.
pub async fn login_page_text<S>(app: &S, cookie: Cookie<'static>) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    String::from_utf8_lossy(&test::read_body(res).await).into_owned()
}
