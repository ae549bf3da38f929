//! Client for the remote CRUD API.
//!
//! Handlers talk to the API through the `RemoteApi` trait object so tests can
//! swap in an in-memory implementation.

use async_trait::async_trait;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::api::models::{Entity, EntityFields, EntityKind, ImagePayload, RawEntity};
use crate::error::PortalError;

lazy_static! {
    static ref UPSTREAM_FAILURES: IntCounterVec = register_int_counter_vec!(
        "portal_upstream_failures_total",
        "Remote API request failures by operation.",
        &["operation"]
    )
    .expect("Failed to register upstream failure counter");
}

fn note_failure(operation: &str) {
    UPSTREAM_FAILURES.with_label_values(&[operation]).inc();
}

#[async_trait]
pub trait RemoteApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, PortalError>;
    async fn fetch(&self, kind: EntityKind, id: i64) -> Result<Entity, PortalError>;
    async fn login(&self, username: &str, password: &str) -> Result<String, PortalError>;
    async fn create(
        &self,
        kind: EntityKind,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError>;
    async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError>;
    async fn delete(&self, kind: EntityKind, id: i64, token: &str) -> Result<(), PortalError>;
}

#[derive(Debug, Deserialize)]
struct OneResponse {
    data: RawEntity,
}

#[derive(Debug, Deserialize)]
struct ManyResponse {
    data: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct HttpRemoteApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteApi {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.base_url, kind.api_path())
    }

    fn record_url(&self, kind: EntityKind, id: i64) -> String {
        format!("{}/api/{}/{}", self.base_url, kind.api_path(), id)
    }

    /// Multipart body carrying the text fields plus either file parts or
    /// plain string references under the `image` key.
    fn multipart_form(fields: &EntityFields, images: &ImagePayload) -> Result<Form, PortalError> {
        let mut form = Form::new()
            .text("title", fields.title.clone())
            .text("description", fields.description.clone())
            .text("location", fields.location.clone())
            .text("date", fields.date.clone());

        match images {
            ImagePayload::Files(files) => {
                for file in files {
                    let mime = if file.content_type.is_empty() {
                        mime_guess::from_path(&file.filename)
                            .first_or_octet_stream()
                            .to_string()
                    } else {
                        file.content_type.clone()
                    };
                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone())
                        .mime_str(&mime)?;
                    form = form.part("image", part);
                }
            }
            ImagePayload::Remote(urls) => {
                for url in urls {
                    form = form.text("image", url.clone());
                }
            }
        }

        Ok(form)
    }

    fn check_status(operation: &str, status: reqwest::StatusCode) -> Result<(), PortalError> {
        if status.is_success() {
            Ok(())
        } else {
            note_failure(operation);
            Err(PortalError::Server {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, PortalError> {
        let response = self
            .client
            .get(self.collection_url(kind))
            .send()
            .await
            .map_err(|e| {
                note_failure("list");
                PortalError::from(e)
            })?;
        Self::check_status("list", response.status())?;

        let body: ManyResponse = response.json().await.map_err(|e| {
            note_failure("list");
            PortalError::Parse(e.to_string())
        })?;
        Ok(body
            .data
            .into_iter()
            .map(|raw| Entity::from_raw(raw, &self.base_url))
            .collect())
    }

    async fn fetch(&self, kind: EntityKind, id: i64) -> Result<Entity, PortalError> {
        let response = self
            .client
            .get(self.record_url(kind, id))
            .send()
            .await
            .map_err(|e| {
                note_failure("fetch");
                PortalError::from(e)
            })?;
        Self::check_status("fetch", response.status())?;

        let body: OneResponse = response.json().await.map_err(|e| {
            note_failure("fetch");
            PortalError::Parse(e.to_string())
        })?;
        Ok(Entity::from_raw(body.data, &self.base_url))
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, PortalError> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| {
                note_failure("login");
                PortalError::from(e)
            })?;
        Self::check_status("login", response.status())?;

        let body: TokenResponse = response.json().await.map_err(|e| {
            note_failure("login");
            PortalError::Parse(e.to_string())
        })?;
        Ok(body.access_token)
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError> {
        let form = Self::multipart_form(fields, images)?;
        let response = self
            .client
            .post(self.collection_url(kind))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                note_failure("create");
                PortalError::from(e)
            })?;
        Self::check_status("create", response.status())
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError> {
        let form = Self::multipart_form(fields, images)?;
        let response = self
            .client
            .put(self.record_url(kind, id))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                note_failure("update");
                PortalError::from(e)
            })?;
        Self::check_status("update", response.status())
    }

    async fn delete(&self, kind: EntityKind, id: i64, token: &str) -> Result<(), PortalError> {
        let response = self
            .client
            .delete(self.record_url(kind, id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                note_failure("delete");
                PortalError::from(e)
            })?;
        Self::check_status("delete", response.status())
    }
}
