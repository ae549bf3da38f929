//! The admin scope must be gated per request on cookie presence alone.

mod common;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};

use common::MockRemoteApi;
use desa_wisata_portal::router;

#[actix_web::test]
async fn dashboard_redirects_to_login_without_token() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/adminDashboard").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[actix_web::test]
async fn empty_token_value_counts_as_absent() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/adminDashboard")
            .cookie(Cookie::new("auth_token", ""))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn any_non_empty_token_allows_the_route() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/adminDashboard")
            .cookie(Cookie::new("auth_token", "bukan-jwt-sungguhan"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn nested_admin_routes_are_guarded_too() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/adminDashboard/acara/1")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn gate_is_evaluated_per_request_not_at_startup() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    // First navigation without a token is turned away.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/adminDashboard").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    // A token acquired afterwards unlocks the same running app immediately.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/adminDashboard")
            .cookie(Cookie::new("auth_token", "baru-saja-login"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_routes_need_no_token() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    for uri in ["/", "/peta", "/profil", "/acara", "/kuliner", "/tempat-wisata", "/login"] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "route {uri} should be public");
    }
}
