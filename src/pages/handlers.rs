//! Public pages: landing, map, profile, and the list/detail pages for the
//! three content types. Every fetch failure is logged and rendered as a
//! banner; nothing here is fatal.

use actix_web::{web, HttpResponse};

use crate::api::models::{Entity, EntityKind};
use crate::error::PortalError;
use crate::pages::layout::{self, Banner};
use crate::state::AppState;

pub async fn beranda() -> HttpResponse {
    let mut sections = String::new();
    for kind in EntityKind::ALL {
        sections.push_str(&format!(
            "<a class=\"kartu-beranda\" href=\"{}\"><h3>{}</h3></a>",
            kind.route_path(),
            kind.label()
        ));
    }
    let content = format!(
        "<section class=\"beranda\">\
         <h1>Selamat Datang di Desa Wisata</h1>\
         <p>Jelajahi tempat wisata, kuliner khas, dan acara desa.</p>\
         <div class=\"kartu-baris\">{sections}</div>\
         </section>"
    );
    layout::html_response(layout::page("Beranda", "/", &content))
}

pub async fn peta() -> HttpResponse {
    // The map itself is mounted client-side by the map library; this page
    // only provides the container.
    let content = "<section><h2>Peta Desa</h2>\
                   <div id=\"peta\" class=\"peta-wadah\">Peta sedang dimuat…</div>\
                   </section>";
    layout::html_response(layout::page("Peta", "/peta", content))
}

pub async fn profil() -> HttpResponse {
    let content = "<section class=\"profil\">\
                   <h2>Profil Desa</h2>\
                   <p>Desa wisata dengan panorama alam, kuliner khas, dan agenda \
                   budaya sepanjang tahun. Portal ini dikelola oleh pemerintah desa \
                   sebagai pusat informasi bagi pengunjung.</p>\
                   </section>";
    layout::html_response(layout::page("Profil", "/profil", content))
}

fn entity_card(kind: EntityKind, entity: &Entity) -> String {
    let href = format!("{}/{}", kind.route_path(), entity.id);
    let image = entity
        .image
        .first()
        .map(|url| format!("<img src=\"{}\" alt=\"\">", layout::escape_html(url)))
        .unwrap_or_default();
    format!(
        "<article class=\"kartu\"><a href=\"{href}\">{image}\
         <h3>{}</h3><p>{} · {}</p></a></article>",
        layout::escape_html(&entity.title),
        layout::format_tanggal(&entity.date),
        layout::escape_html(&entity.location),
    )
}

pub async fn entity_list(kind: EntityKind, state: web::Data<AppState>) -> HttpResponse {
    match state.api.list(kind).await {
        Ok(entities) => {
            let cards: String = entities.iter().map(|e| entity_card(kind, e)).collect();
            let body = if cards.is_empty() {
                "<p class=\"kosong\">Belum ada data.</p>".to_string()
            } else {
                format!("<div class=\"kartu-baris\">{cards}</div>")
            };
            let content = format!("<section><h2>{}</h2>{body}</section>", kind.label());
            layout::html_response(layout::page(kind.label(), kind.route_path(), &content))
        }
        Err(e) => {
            log::error!("Gagal memuat daftar {}: {e}", kind.label());
            let banner = Banner::error(format!("Gagal memuat data {}.", kind.label()));
            let content = layout::banner_html(Some(&banner));
            layout::html_response(layout::page(kind.label(), kind.route_path(), &content))
        }
    }
}

pub async fn entity_detail(
    kind: EntityKind,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match state.api.fetch(kind, id).await {
        Ok(entity) => {
            let images: String = entity
                .image
                .iter()
                .map(|url| format!("<img src=\"{}\" alt=\"\">", layout::escape_html(url)))
                .collect();
            let content = format!(
                "<article class=\"detail\">\
                 <h2>{}</h2>\
                 <p class=\"meta\">{} · {}</p>\
                 <div class=\"galeri\">{images}</div>\
                 <p>{}</p>\
                 </article>",
                layout::escape_html(&entity.title),
                layout::format_tanggal(&entity.date),
                layout::escape_html(&entity.location),
                layout::escape_html(&entity.description),
            );
            layout::html_response(layout::page(&entity.title, kind.route_path(), &content))
        }
        Err(PortalError::Server { status: 404 }) => {
            let content = "<p class=\"kosong\">Data tidak ditemukan.</p>";
            HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(layout::page("Tidak Ditemukan", kind.route_path(), content))
        }
        Err(e) => {
            log::error!("Gagal memuat detail {} {id}: {e}", kind.label());
            let banner = Banner::error(format!("Gagal memuat data {}.", kind.label()));
            let content = layout::banner_html(Some(&banner));
            layout::html_response(layout::page(kind.label(), kind.route_path(), &content))
        }
    }
}
