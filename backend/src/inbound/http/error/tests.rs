//! Tests for HTTP error mapping.

use super::*;
use crate::middleware::{TRACE_ID_HEADER, Trace};
use actix_web::body::to_bytes;
use actix_web::test as actix_test;
use actix_web::{App, web};
use rstest::rstest;

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("later"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let response = Error::internal("database password leaked").error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body()).await.expect("body");
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("Internal server error"));
    assert!(!text.contains("password"));
}

#[actix_web::test]
async fn client_errors_keep_their_message_and_are_escaped() {
    let response = Error::not_found("no <such> page").error_response();

    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    let body = to_bytes(response.into_body()).await.expect("body");
    assert!(String::from_utf8_lossy(&body).contains("no &lt;such&gt; page"));
}

#[actix_web::test]
async fn error_page_references_the_request_trace_id() {
    let app = actix_test::init_service(App::new().wrap(Trace).route(
        "/",
        web::get().to(|| async { Err::<String, Error>(Error::internal("boom")) }),
    ))
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = actix_test::read_body(res).await;

    assert!(String::from_utf8_lossy(&body).contains(&header));
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadRequest("raw detail");
    let error = Error::from(actix);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}
