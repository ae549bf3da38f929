//! Shared helpers for the integration tests: an in-memory `RemoteApi`
//! implementation and multipart body construction.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use parking_lot::Mutex;

use desa_wisata_portal::api::client::RemoteApi;
use desa_wisata_portal::api::models::{Entity, EntityFields, EntityKind, ImagePayload};
use desa_wisata_portal::error::PortalError;
use desa_wisata_portal::AppState;

#[derive(Debug)]
pub struct RecordedWrite {
    pub kind: EntityKind,
    pub id: Option<i64>,
    pub fields: EntityFields,
    pub images: ImagePayload,
    pub token: String,
}

/// In-memory stand-in for the remote API.
#[derive(Default)]
pub struct MockRemoteApi {
    pub entities: HashMap<(EntityKind, i64), Entity>,
    pub writes: Mutex<Vec<RecordedWrite>>,
    pub deletes: Mutex<Vec<(EntityKind, i64, String)>>,
    /// Token handed out on login; `None` makes login answer 401.
    pub login_token: Option<String>,
    /// Make every read answer 500.
    pub fail_reads: bool,
}

impl MockRemoteApi {
    pub fn seed(mut self, kind: EntityKind, entity: Entity) -> Self {
        self.entities.insert((kind, entity.id), entity);
        self
    }
}

#[async_trait]
impl RemoteApi for MockRemoteApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, PortalError> {
        if self.fail_reads {
            return Err(PortalError::Server { status: 500 });
        }
        let mut entities: Vec<Entity> = self
            .entities
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, e)| e.clone())
            .collect();
        entities.sort_by_key(|e| e.id);
        Ok(entities)
    }

    async fn fetch(&self, kind: EntityKind, id: i64) -> Result<Entity, PortalError> {
        if self.fail_reads {
            return Err(PortalError::Server { status: 500 });
        }
        self.entities
            .get(&(kind, id))
            .cloned()
            .ok_or(PortalError::Server { status: 404 })
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<String, PortalError> {
        match &self.login_token {
            Some(token) => Ok(token.clone()),
            None => Err(PortalError::Server { status: 401 }),
        }
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError> {
        self.writes.lock().push(RecordedWrite {
            kind,
            id: None,
            fields: fields.clone(),
            images: images.clone(),
            token: token.to_string(),
        });
        Ok(())
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &EntityFields,
        images: &ImagePayload,
        token: &str,
    ) -> Result<(), PortalError> {
        self.writes.lock().push(RecordedWrite {
            kind,
            id: Some(id),
            fields: fields.clone(),
            images: images.clone(),
            token: token.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: i64, token: &str) -> Result<(), PortalError> {
        self.deletes.lock().push((kind, id, token.to_string()));
        Ok(())
    }
}

pub fn entity(id: i64, title: &str) -> Entity {
    Entity {
        id,
        title: title.to_string(),
        description: "Deskripsi kegiatan desa".to_string(),
        location: "Lapangan desa".to_string(),
        date: "2025-09-01".to_string(),
        image: vec!["https://api.example.com/uploads/foto.jpg".to_string()],
    }
}

pub fn test_state(mock: Arc<MockRemoteApi>) -> web::Data<AppState> {
    web::Data::new(AppState::with_api(mock))
}

/// Raw multipart body with one `image` part per file.
pub fn multipart_body(boundary: &str, files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
