//! Tests for the sign-in and sign-out handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    AccountCommand, MockAccountCommand, MockDashboardQuery, MockLocationsCommand,
    MockWeatherSource, UserRepository,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    location_header, login_form, memory_state, next_cookie, session_cookie, test_app,
};

fn fixture_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

#[actix_web::test]
async fn first_login_creates_user_and_redirects_to_dashboard() {
    let (state, store) = memory_state(MockWeatherSource::new());
    let app = test::init_service(test_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([
            ("user_id", "  ada  "),
            ("name", "Ada Lovelace"),
            ("default_units", "imperial"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location_header(&res).as_deref(), Some("/dashboard"));
    let cookie = session_cookie(&res).expect("session cookie");

    let user = store
        .find_by_id(&fixture_id("ada"))
        .await
        .expect("store read")
        .expect("user created");
    assert_eq!(user.display_name.as_ref(), "Ada Lovelace");
    assert_eq!(user.default_units, UnitSystem::Imperial);

    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains("New user created."));
}

#[actix_web::test]
async fn returning_login_keeps_profile_and_welcomes_back() {
    let (state, store) = memory_state(MockWeatherSource::new());
    let app = test::init_service(test_app(state)).await;

    let first = test::TestRequest::post()
        .uri("/")
        .set_form([
            ("user_id", "ada"),
            ("name", "Ada"),
            ("default_units", "imperial"),
        ])
        .to_request();
    test::call_service(&app, first).await;

    let second = test::TestRequest::post()
        .uri("/")
        .set_form([
            ("user_id", "ada"),
            ("name", "Someone Else"),
            ("default_units", "metric"),
        ])
        .to_request();
    let res = test::call_service(&app, second).await;
    let cookie = session_cookie(&res).expect("session cookie");

    let user = store
        .find_by_id(&fixture_id("ada"))
        .await
        .expect("store read")
        .expect("user kept");
    assert_eq!(user.display_name.as_ref(), "Ada");
    assert_eq!(user.default_units, UnitSystem::Imperial);

    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains("Welcome back!"));
}

#[rstest]
#[case("   ", "Please enter a user ID.")]
#[case("", "Please enter a user ID.")]
#[actix_web::test]
async fn blank_user_id_writes_nothing(#[case] user_id: &str, #[case] notice: &str) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_login().times(0);
    let state = web::Data::new(HttpState::from(HttpStatePorts {
        accounts: Arc::new(accounts),
        locations: Arc::new(MockLocationsCommand::new()),
        dashboard: Arc::new(MockDashboardQuery::new()),
    }));
    let app = test::init_service(test_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("user_id", user_id), ("default_units", "metric")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location_header(&res).as_deref(), Some("/"));
    let cookie = session_cookie(&res).expect("flash stored");
    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains(notice));
}

#[actix_web::test]
async fn new_user_with_unknown_units_is_not_created() {
    let (state, store) = memory_state(MockWeatherSource::new());
    let app = test::init_service(test_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("user_id", "ada"), ("default_units", "kelvin")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(location_header(&res).as_deref(), Some("/"));
    assert!(
        store
            .find_by_id(&fixture_id("ada"))
            .await
            .expect("store read")
            .is_none()
    );
    let cookie = session_cookie(&res).expect("flash stored");
    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains(INVALID_UNITS_FLASH));
}

#[actix_web::test]
async fn returning_user_with_unknown_units_still_signs_in() {
    let (state, store) = memory_state(MockWeatherSource::new());
    let app = test::init_service(test_app(state)).await;
    test::call_service(&app, login_form("ada").to_request()).await;

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("user_id", "ada"), ("default_units", "kelvin")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location_header(&res).as_deref(), Some("/dashboard"));
    let user = store
        .find_by_id(&fixture_id("ada"))
        .await
        .expect("store read")
        .expect("user kept");
    assert_eq!(user.default_units, UnitSystem::Metric);
    let cookie = session_cookie(&res).expect("session cookie");
    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains("Welcome back!"));
}

#[actix_web::test]
async fn store_failures_render_redacted_error_page() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_login()
        .times(1)
        .return_once(|_| Err(Error::internal("connection refused by 10.0.0.7")));
    let state = web::Data::new(HttpState::from(HttpStatePorts {
        accounts: Arc::new(accounts),
        locations: Arc::new(MockLocationsCommand::new()),
        dashboard: Arc::new(MockDashboardQuery::new()),
    }));
    let app = test::init_service(test_app(state)).await;

    let res = test::call_service(&app, login_form("ada").to_request()).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(res).await;
    assert!(!String::from_utf8_lossy(&body).contains("10.0.0.7"));
}

#[actix_web::test]
async fn logout_clears_session_and_next_dashboard_redirects() {
    let (state, _store) = memory_state(MockWeatherSource::new());
    let accounts: Arc<dyn AccountCommand> = state.accounts.clone();
    let app = test::init_service(test_app(state)).await;

    let res = test::call_service(&app, login_form("ada").to_request()).await;
    let cookie = session_cookie(&res).expect("session cookie");
    assert!(
        accounts
            .current_user(&fixture_id("ada"))
            .await
            .expect("lookup")
            .is_some()
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location_header(&res).as_deref(), Some("/"));
    let cookie = next_cookie(cookie, &res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location_header(&res).as_deref(), Some("/"));
    let cookie = next_cookie(cookie, &res);

    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let body = test::read_body(page).await;
    assert!(String::from_utf8_lossy(&body).contains("You have been logged out."));
}
