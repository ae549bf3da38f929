//! The create/update form family.
//!
//! The form walks through fetch, populate, image selection/removal, and a
//! multipart submission to the remote API. Selected images live in the draft
//! registry between requests; uploading or removing an image redirects back
//! to the form with `?draf=1` so the in-progress draft survives, while a
//! plain GET replaces it with a fresh one.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;

use crate::admin::draft::{unique_filename, ImageDraft, IncomingImage, NEW_DRAFT_ID};
use crate::admin::handlers::{redirect, unknown_kind_page};
use crate::api::models::{EntityFields, EntityKind, ImagePayload};
use crate::error::PortalError;
use crate::pages::layout::{self, Banner};
use crate::router;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub draf: Option<u8>,
}

#[derive(Debug, Default)]
struct DraftView {
    api_images: Vec<String>,
    previews: Vec<String>,
}

fn draft_view(state: &AppState, key: (EntityKind, i64)) -> DraftView {
    state
        .drafts
        .with(key, |draft| DraftView {
            api_images: draft.api_images().to_vec(),
            previews: draft.preview_filenames(),
        })
        .unwrap_or_default()
}

/// Form URL for a record, or for the create form when `id` is the sentinel.
fn form_url(kind: EntityKind, id: i64) -> String {
    if id == NEW_DRAFT_ID {
        format!("{}/{}/baru", router::ADMIN_PATH, kind.slug())
    } else {
        format!("{}/{}/{}", router::ADMIN_PATH, kind.slug(), id)
    }
}

fn render_form(
    kind: EntityKind,
    id: i64,
    fields: &EntityFields,
    view: &DraftView,
    banner: Option<&Banner>,
) -> String {
    let submit_url = form_url(kind, id);
    let image_base = format!("{}/{}/{}", router::ADMIN_PATH, kind.slug(), id);

    let mut gallery = String::new();
    if view.previews.is_empty() {
        for url in &view.api_images {
            gallery.push_str(&format!(
                "<figure class=\"pratinjau\"><img src=\"{}\" alt=\"\"></figure>",
                layout::escape_html(url)
            ));
        }
    } else {
        for (index, filename) in view.previews.iter().enumerate() {
            gallery.push_str(&format!(
                "<figure class=\"pratinjau\">\
                 <img src=\"{image_base}/gambar/{index}\" alt=\"{alt}\">\
                 <form method=\"post\" action=\"{image_base}/gambar/{index}/hapus\">\
                 <button type=\"submit\" title=\"Hapus gambar\">X</button></form>\
                 </figure>",
                alt = layout::escape_html(filename),
            ));
        }
    }

    let upload_disabled = if view.previews.len() >= crate::admin::draft::MAX_IMAGES {
        " disabled"
    } else {
        ""
    };
    let heading = if id == NEW_DRAFT_ID {
        format!("Tambah Data {}", kind.label())
    } else {
        format!("Update Data {}", kind.label())
    };
    let submit_label = if id == NEW_DRAFT_ID {
        "Simpan Data"
    } else {
        "Update Data"
    };

    let content = format!(
        "{banner}<section class=\"formulir\"><h2>{heading}</h2>\
         <form method=\"post\" action=\"{submit_url}\">\
         <label for=\"title\">Title</label>\
         <input id=\"title\" name=\"title\" value=\"{title}\" placeholder=\"Masukan title\" required>\
         <label for=\"description\">Description</label>\
         <textarea id=\"description\" name=\"description\" placeholder=\"Masukan deskripsi\" required>{description}</textarea>\
         <label for=\"location\">Location</label>\
         <input id=\"location\" name=\"location\" value=\"{location}\" placeholder=\"Masukan lokasi\" required>\
         <label for=\"date\">Tanggal</label>\
         <input id=\"date\" name=\"date\" type=\"date\" value=\"{date}\">\
         <button type=\"submit\">{submit_label}</button>\
         </form>\
         <form method=\"post\" action=\"{image_base}/gambar\" enctype=\"multipart/form-data\">\
         <label for=\"images\">Gambar (max 2)</label>\
         <input id=\"images\" name=\"image\" type=\"file\" multiple accept=\"image/*\"{upload_disabled}>\
         <button type=\"submit\">Unggah</button>\
         </form>\
         <div class=\"galeri\">{gallery}</div>\
         <p class=\"hitung\">{count}/2 Gambar baru</p>\
         </section>",
        banner = layout::banner_html(banner),
        title = layout::escape_html(&fields.title),
        description = layout::escape_html(&fields.description),
        location = layout::escape_html(&fields.location),
        date = layout::escape_html(&fields.date),
        count = view.previews.len(),
    );
    layout::bare(&heading, &content)
}

/// Re-render the form with a banner, pulling field values from the remote
/// record (or empty ones for the create form).
async fn form_with_banner(
    state: &AppState,
    kind: EntityKind,
    id: i64,
    banner: Banner,
) -> HttpResponse {
    let fields = if id == NEW_DRAFT_ID {
        EntityFields::default()
    } else {
        match state.api.fetch(kind, id).await {
            Ok(entity) => entity.fields(),
            Err(e) => {
                log::error!("Gagal memuat ulang {} {id}: {e}", kind.label());
                EntityFields::default()
            }
        }
    };
    let view = draft_view(state, (kind, id));
    layout::html_response(render_form(kind, id, &fields, &view, Some(&banner)))
}

pub async fn edit_form(
    path: web::Path<(String, i64)>,
    query: web::Query<FormQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (slug, id) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return unknown_kind_page();
    };
    let key = (kind, id);
    let keep_draft = query.draf.is_some() && state.drafts.contains(key);

    match state.api.fetch(kind, id).await {
        Ok(entity) => {
            if !keep_draft {
                state.drafts.replace(key, ImageDraft::new(entity.image.clone()));
            }
            let view = draft_view(&state, key);
            layout::html_response(render_form(kind, id, &entity.fields(), &view, None))
        }
        Err(e) => {
            log::error!("Gagal memuat {} {id}: {e}", kind.label());
            let content = layout::banner_html(Some(&Banner::error(format!(
                "Gagal memuat data {}.",
                kind.label()
            ))));
            layout::html_response(layout::bare("Update Data", &content))
        }
    }
}

pub async fn create_form(
    path: web::Path<String>,
    query: web::Query<FormQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let Some(kind) = EntityKind::from_slug(&path.into_inner()) else {
        return unknown_kind_page();
    };
    let key = (kind, NEW_DRAFT_ID);
    if query.draf.is_none() || !state.drafts.contains(key) {
        state.drafts.replace(key, ImageDraft::new(Vec::new()));
    }
    let view = draft_view(&state, key);
    layout::html_response(render_form(
        kind,
        NEW_DRAFT_ID,
        &EntityFields::default(),
        &view,
        None,
    ))
}

async fn collect_images(mut payload: Multipart) -> Result<Vec<IncomingImage>, PortalError> {
    let mut images = Vec::new();
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| PortalError::Validation(format!("Unggahan tidak valid: {e}")))?
    {
        let (name, filename) = {
            let Some(disposition) = field.content_disposition() else {
                continue;
            };
            (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            )
        };
        if name.as_deref() != Some("image") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| PortalError::Validation(format!("Unggahan terputus: {e}")))?
        {
            bytes.extend_from_slice(&chunk);
        }
        // A file input with nothing selected still submits one empty part.
        if bytes.is_empty() {
            continue;
        }

        let original = filename.unwrap_or_else(|| format!("gambar-{}.bin", images.len()));
        images.push(IncomingImage {
            filename: unique_filename(&original),
            content_type,
            bytes,
        });
    }
    Ok(images)
}

pub async fn upload_images(
    path: web::Path<(String, i64)>,
    payload: Multipart,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (slug, id) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return unknown_kind_page();
    };
    let key = (kind, id);

    let incoming = match collect_images(payload).await {
        Ok(images) => images,
        Err(e) => {
            log::error!("Gagal membaca unggahan untuk {} {id}: {e}", kind.label());
            return form_with_banner(&state, kind, id, Banner::error(e.to_string())).await;
        }
    };

    match state.drafts.with_mut(key, |draft| draft.add_images(incoming)) {
        // No draft means the form was never opened; send the admin there.
        None => redirect(&form_url(kind, id)),
        Some(Ok(())) => redirect(&format!("{}?draf=1", form_url(kind, id))),
        Some(Err(e)) => {
            log::warn!("Unggahan ditolak untuk {} {id}: {e}", kind.label());
            form_with_banner(&state, kind, id, Banner::error(e.to_string())).await
        }
    }
}

pub async fn preview_image(
    path: web::Path<(String, i64, usize)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, PortalError> {
    let (slug, id, index) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let preview = state.drafts.with((kind, id), |draft| {
        draft
            .preview(index)
            .map(|p| (p.content_type.clone(), p.read()))
    });
    let Some((content_type, data)) = preview.flatten() else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let bytes = data?;
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

pub async fn remove_image(
    path: web::Path<(String, i64, usize)>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (slug, id, index) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return unknown_kind_page();
    };
    let key = (kind, id);

    match state.drafts.with_mut(key, |draft| draft.remove_image(index)) {
        None => redirect(&form_url(kind, id)),
        Some(Ok(())) => redirect(&format!("{}?draf=1", form_url(kind, id))),
        Some(Err(e)) => form_with_banner(&state, kind, id, Banner::error(e.to_string())).await,
    }
}

pub async fn submit_update(
    req: HttpRequest,
    path: web::Path<(String, i64)>,
    form: web::Form<EntityFields>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (slug, id) = path.into_inner();
    let Some(kind) = EntityKind::from_slug(&slug) else {
        return unknown_kind_page();
    };
    let Some(token) = session::auth_token(&req) else {
        return redirect(router::LOGIN_PATH);
    };
    let key = (kind, id);

    let payload = state
        .drafts
        .with(key, |draft| draft.payload())
        .unwrap_or_else(|| Ok(ImagePayload::Remote(Vec::new())));
    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Gagal menyiapkan gambar untuk {} {id}: {e}", kind.label());
            let view = draft_view(&state, key);
            return layout::html_response(render_form(
                kind,
                id,
                &form,
                &view,
                Some(&Banner::error("Gagal Update data")),
            ));
        }
    };

    match state.api.update(kind, id, &form, &payload, &token).await {
        Ok(()) => {
            state.drafts.remove(key);
            log::info!("{} {id} diperbarui", kind.label());
            redirect(&format!("{}?sukses=1", router::ADMIN_PATH))
        }
        Err(e) => {
            log::error!("Gagal memperbarui {} {id}: {e}", kind.label());
            let view = draft_view(&state, key);
            layout::html_response(render_form(
                kind,
                id,
                &form,
                &view,
                Some(&Banner::error("Gagal Update data")),
            ))
        }
    }
}

pub async fn submit_create(
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<EntityFields>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let Some(kind) = EntityKind::from_slug(&path.into_inner()) else {
        return unknown_kind_page();
    };
    let Some(token) = session::auth_token(&req) else {
        return redirect(router::LOGIN_PATH);
    };
    let key = (kind, NEW_DRAFT_ID);

    let payload = state
        .drafts
        .with(key, |draft| draft.payload())
        .unwrap_or_else(|| Ok(ImagePayload::Remote(Vec::new())));
    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Gagal menyiapkan gambar untuk {} baru: {e}", kind.label());
            let view = draft_view(&state, key);
            return layout::html_response(render_form(
                kind,
                NEW_DRAFT_ID,
                &form,
                &view,
                Some(&Banner::error("Gagal menyimpan data")),
            ));
        }
    };

    match state.api.create(kind, &form, &payload, &token).await {
        Ok(()) => {
            state.drafts.remove(key);
            log::info!("{} baru disimpan", kind.label());
            redirect(&format!("{}?sukses=1", router::ADMIN_PATH))
        }
        Err(e) => {
            log::error!("Gagal menyimpan {} baru: {e}", kind.label());
            let view = draft_view(&state, key);
            layout::html_response(render_form(
                kind,
                NEW_DRAFT_ID,
                &form,
                &view,
                Some(&Banner::error("Gagal menyimpan data")),
            ))
        }
    }
}
