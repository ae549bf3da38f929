//! Declarative route table.
//!
//! Public entity pages are registered by iterating `EntityKind::ALL`; the
//! admin scope is wrapped with the auth middleware so the gate runs on every
//! request, not once at startup.

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::admin;
use crate::api::models::EntityKind;
use crate::pages;
use crate::session;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_PATH: &str = "/adminDashboard";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::beranda))
        .route("/peta", web::get().to(pages::peta))
        .route("/profil", web::get().to(pages::profil))
        .route(LOGIN_PATH, web::get().to(admin::login_form))
        .route(LOGIN_PATH, web::post().to(admin::login_submit))
        .route("/logout", web::post().to(admin::logout));

    for kind in EntityKind::ALL {
        cfg.route(
            kind.route_path(),
            web::get().to(move |state: web::Data<AppState>| pages::entity_list(kind, state)),
        );
        cfg.route(
            &format!("{}/{{id}}", kind.route_path()),
            web::get().to(move |state: web::Data<AppState>, path: web::Path<i64>| {
                pages::entity_detail(kind, state, path)
            }),
        );
    }

    cfg.service(
        web::scope(ADMIN_PATH)
            .wrap(from_fn(session::require_auth))
            .route("", web::get().to(admin::dashboard))
            .route("/{kind}/baru", web::get().to(admin::create_form))
            .route("/{kind}/baru", web::post().to(admin::submit_create))
            .route("/{kind}/{id}", web::get().to(admin::edit_form))
            .route("/{kind}/{id}", web::post().to(admin::submit_update))
            .route("/{kind}/{id}/hapus", web::post().to(admin::delete_entity))
            .route("/{kind}/{id}/gambar", web::post().to(admin::upload_images))
            .route(
                "/{kind}/{id}/gambar/{index}",
                web::get().to(admin::preview_image),
            )
            .route(
                "/{kind}/{id}/gambar/{index}/hapus",
                web::post().to(admin::remove_image),
            ),
    );
}
