pub mod client;
pub mod models;

pub use client::{HttpRemoteApi, RemoteApi};
pub use models::{Entity, EntityFields, EntityKind, ImagePayload, UploadFile};
