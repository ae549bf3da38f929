//! HTML shell shared by every page.
//!
//! The public shell always renders the navigation bar; the landing section is
//! the body of `/` while every other route supplies its own content. Admin
//! pages use the bare shell without the public navigation.

use actix_web::HttpResponse;
use chrono::{Datelike, NaiveDate};

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "Beranda"),
    ("/peta", "Peta"),
    ("/tempat-wisata", "Tempat Wisata"),
    ("/kuliner", "Kuliner"),
    ("/acara", "Acara"),
    ("/profil", "Profil"),
];

/// Transient notification rendered at the top of the content area.
#[derive(Debug, Clone)]
pub struct Banner {
    pub error: bool,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
        }
    }
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn nav_bar(active: &str) -> String {
    let mut links = String::new();
    for (href, label) in NAV_ITEMS {
        let class = if *href == active { " class=\"aktif\"" } else { "" };
        links.push_str(&format!("<a href=\"{href}\"{class}>{label}</a>"));
    }
    format!("<nav class=\"navbar\"><span class=\"merek\">Desa Wisata</span>{links}</nav>")
}

pub fn banner_html(banner: Option<&Banner>) -> String {
    match banner {
        Some(b) => {
            let class = if b.error { "banner galat" } else { "banner sukses" };
            format!("<div class=\"{class}\">{}</div>", escape_html(&b.message))
        }
        None => String::new(),
    }
}

fn shell(title: &str, header: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | Desa Wisata</title>\n\
         <link rel=\"stylesheet\" href=\"/static/gaya.css\">\n</head>\n<body>\n\
         {header}\n<main>\n{content}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Public page: navigation bar plus content.
pub fn page(title: &str, active: &str, content: &str) -> String {
    shell(title, &nav_bar(active), content)
}

/// Admin page: no public navigation, just a small header.
pub fn bare(title: &str, content: &str) -> String {
    let header = "<header class=\"admin-kepala\"><a href=\"/adminDashboard\">Dashboard Admin</a>\
                  <form method=\"post\" action=\"/logout\"><button type=\"submit\">Keluar</button></form>\
                  </header>";
    shell(title, header, content)
}

/// Shell with no header at all; the login page uses this.
pub fn plain(title: &str, content: &str) -> String {
    shell(title, "", content)
}

pub fn error_page(message: &str) -> String {
    bare(
        "Terjadi Kesalahan",
        &banner_html(Some(&Banner::error(message))),
    )
}

pub fn html_response(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup)
}

/// Render an ISO date the way the rest of the site speaks.
pub fn format_tanggal(iso: &str) -> String {
    let date_part = iso.get(..10).unwrap_or(iso);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => {
            let months = [
                "Januari",
                "Februari",
                "Maret",
                "April",
                "Mei",
                "Juni",
                "Juli",
                "Agustus",
                "September",
                "Oktober",
                "November",
                "Desember",
            ];
            let month = months[(date.month0() as usize).min(months.len() - 1)];
            format!("{} {} {}", date.day(), month, date.year())
        }
        Err(_) => iso.to_string(),
    }
}
