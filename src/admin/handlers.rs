//! Login, logout, the dashboard, and record deletion.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::models::EntityKind;
use crate::error::PortalError;
use crate::pages::layout::{self, Banner};
use crate::router;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub sukses: Option<u8>,
}

pub(crate) fn redirect(to: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, to.to_string()))
        .finish()
}

pub(crate) fn unknown_kind_page() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(layout::bare(
            "Tidak Ditemukan",
            "<p class=\"kosong\">Jenis data tidak dikenal.</p>",
        ))
}

fn login_page(banner: Option<&Banner>) -> String {
    let content = format!(
        "{}<section class=\"login\"><h2>Login Admin</h2>\
         <form method=\"post\" action=\"{}\">\
         <label for=\"username\">Username</label>\
         <input id=\"username\" name=\"username\" required>\
         <label for=\"password\">Password</label>\
         <input id=\"password\" name=\"password\" type=\"password\" required>\
         <button type=\"submit\">Masuk</button>\
         </form></section>",
        layout::banner_html(banner),
        router::LOGIN_PATH,
    );
    layout::plain("Login", &content)
}

pub async fn login_form() -> HttpResponse {
    layout::html_response(login_page(None))
}

pub async fn login_submit(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    match state.api.login(&form.username, &form.password).await {
        Ok(token) => HttpResponse::SeeOther()
            .cookie(session::login_cookie(token))
            .insert_header((header::LOCATION, router::ADMIN_PATH))
            .finish(),
        Err(PortalError::Server { status: 401 }) => {
            log::warn!("Login ditolak untuk {}", form.username);
            layout::html_response(login_page(Some(&Banner::error(
                "Username atau password salah.",
            ))))
        }
        Err(e) => {
            log::error!("Gagal login: {e}");
            layout::html_response(login_page(Some(&Banner::error("Gagal masuk. Coba lagi."))))
        }
    }
}

pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .cookie(session::logout_cookie())
        .insert_header((header::LOCATION, "/"))
        .finish()
}

pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let mut content = String::new();
    if query.sukses.is_some() {
        content.push_str(&layout::banner_html(Some(&Banner::success(
            "Data berhasil diperbarui",
        ))));
    }

    for kind in EntityKind::ALL {
        match state.api.list(kind).await {
            Ok(entities) => {
                let mut rows = String::new();
                for entity in &entities {
                    rows.push_str(&format!(
                        "<tr><td>{title}</td><td>{date}</td><td class=\"aksi\">\
                         <a href=\"{admin}/{slug}/{id}\">Ubah</a>\
                         <form method=\"post\" action=\"{admin}/{slug}/{id}/hapus\">\
                         <button type=\"submit\">Hapus</button></form>\
                         </td></tr>",
                        title = layout::escape_html(&entity.title),
                        date = layout::format_tanggal(&entity.date),
                        admin = router::ADMIN_PATH,
                        slug = kind.slug(),
                        id = entity.id,
                    ));
                }
                content.push_str(&format!(
                    "<section><h3>{label}</h3>\
                     <a class=\"tombol\" href=\"{admin}/{slug}/baru\">Tambah {label}</a>\
                     <table><thead><tr><th>Judul</th><th>Tanggal</th><th></th></tr></thead>\
                     <tbody>{rows}</tbody></table></section>",
                    label = kind.label(),
                    admin = router::ADMIN_PATH,
                    slug = kind.slug(),
                ));
            }
            Err(e) => {
                log::error!("Gagal memuat daftar {} untuk dashboard: {e}", kind.label());
                content.push_str(&format!(
                    "<section><h3>{}</h3>{}</section>",
                    kind.label(),
                    layout::banner_html(Some(&Banner::error(format!(
                        "Gagal memuat data {}.",
                        kind.label()
                    )))),
                ));
            }
        }
    }

    layout::html_response(layout::bare("Dashboard", &content))
}

pub async fn delete_entity(
    req: HttpRequest,
    path: web::Path<(String, i64)>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (slug, id) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return unknown_kind_page();
    };
    let Some(token) = session::auth_token(&req) else {
        return redirect(router::LOGIN_PATH);
    };

    match state.api.delete(kind, id, &token).await {
        Ok(()) => {
            log::info!("{} {id} dihapus", kind.label());
            redirect(&format!("{}?sukses=1", router::ADMIN_PATH))
        }
        Err(e) => {
            log::error!("Gagal menghapus {} {id}: {e}", kind.label());
            let content = layout::banner_html(Some(&Banner::error("Gagal menghapus data.")));
            layout::html_response(layout::bare("Dashboard", &content))
        }
    }
}
