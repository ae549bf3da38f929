//! The public surface: landing, map, profile, and the entity pages.

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, App};

use common::MockRemoteApi;
use desa_wisata_portal::api::models::EntityKind;
use desa_wisata_portal::router;

#[actix_web::test]
async fn landing_page_renders_the_beranda_section_with_nav() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let body =
        test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    let markup = std::str::from_utf8(&body).expect("html is utf-8");
    assert!(markup.contains("Selamat Datang di Desa Wisata"));
    assert!(markup.contains("class=\"navbar\""));
}

#[actix_web::test]
async fn list_page_renders_fetched_titles() {
    let mock = Arc::new(
        MockRemoteApi::default()
            .seed(EntityKind::Acara, common::entity(1, "Festival Panen"))
            .seed(EntityKind::Acara, common::entity(2, "Pentas Seni")),
    );
    let state = common::test_state(mock);
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let body =
        test::call_and_read_body(&app, test::TestRequest::get().uri("/acara").to_request()).await;
    let markup = std::str::from_utf8(&body).expect("html is utf-8");
    assert!(markup.contains("Festival Panen"));
    assert!(markup.contains("Pentas Seni"));
    assert!(markup.contains("1 September 2025"));
}

#[actix_web::test]
async fn detail_page_renders_the_record() {
    let mock = Arc::new(
        MockRemoteApi::default().seed(EntityKind::Kuliner, common::entity(5, "Sate Lilit")),
    );
    let state = common::test_state(mock);
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri("/kuliner/5").to_request(),
    )
    .await;
    let markup = std::str::from_utf8(&body).expect("html is utf-8");
    assert!(markup.contains("Sate Lilit"));
    assert!(markup.contains("Deskripsi kegiatan desa"));
    assert!(markup.contains("https://api.example.com/uploads/foto.jpg"));
}

#[actix_web::test]
async fn missing_record_renders_not_found() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/tempat-wisata/99").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn fetch_failure_renders_a_banner_not_a_crash() {
    let mock = Arc::new(MockRemoteApi {
        fail_reads: true,
        ..MockRemoteApi::default()
    });
    let state = common::test_state(mock);
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/acara").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let markup = std::str::from_utf8(&body).expect("html is utf-8");
    assert!(markup.contains("Gagal memuat data Acara."));
}

#[actix_web::test]
async fn map_page_provides_the_container_only() {
    let state = common::test_state(Arc::new(MockRemoteApi::default()));
    let app =
        test::init_service(App::new().app_data(state).configure(router::configure)).await;

    let body =
        test::call_and_read_body(&app, test::TestRequest::get().uri("/peta").to_request()).await;
    let markup = std::str::from_utf8(&body).expect("html is utf-8");
    assert!(markup.contains("id=\"peta\""));
}
