//! Closed error taxonomy for everything that can go wrong between the user
//! and the remote API: form validation, transport, upstream status, body
//! parsing, and local spool files.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Client-side rejection (file count/size/type, bad form input). The
    /// message is user-facing.
    #[error("{0}")]
    Validation(String),
    #[error("Gagal menghubungi server data: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server data menjawab dengan status {status}")]
    Server { status: u16 },
    #[error("Jawaban server data tidak dapat dibaca: {0}")]
    Parse(String),
    #[error("Gagal menulis berkas sementara: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::Network(_) | PortalError::Server { .. } | PortalError::Parse(_) => {
                StatusCode::BAD_GATEWAY
            }
            PortalError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(crate::pages::layout::error_page(&self.to_string()))
    }
}
