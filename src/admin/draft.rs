//! In-progress form state for the admin CRUD forms.
//!
//! Selected images are spooled to temp files that double as the preview
//! source. Each spool file lives exactly as long as its draft entry: explicit
//! removal and draft disposal both drop the `NamedTempFile`, which deletes
//! the file on disk.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use sanitize_filename::sanitize;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::api::models::{EntityKind, ImagePayload, UploadFile};
use crate::error::PortalError;

pub const MAX_IMAGES: usize = 2;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Draft key for a record that does not exist upstream yet.
pub const NEW_DRAFT_ID: i64 = 0;

pub type DraftKey = (EntityKind, i64);

/// One image received from the admin's browser, not yet validated.
#[derive(Debug)]
pub struct IncomingImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A validated image spooled to disk for previewing and later forwarding.
pub struct PreviewImage {
    pub filename: String,
    pub content_type: String,
    file: NamedTempFile,
}

impl PreviewImage {
    fn spool(image: IncomingImage) -> std::io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&image.bytes)?;
        file.flush()?;
        Ok(Self {
            filename: image.filename,
            content_type: image.content_type,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.file.path())
    }
}

/// Unique upstream filename: uuid prefix plus the sanitized original name.
pub fn unique_filename(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize(original))
}

#[derive(Default)]
pub struct ImageDraft {
    api_images: Vec<String>,
    previews: Vec<PreviewImage>,
}

impl ImageDraft {
    pub fn new(api_images: Vec<String>) -> Self {
        Self {
            api_images,
            previews: Vec::new(),
        }
    }

    pub fn api_images(&self) -> &[String] {
        &self.api_images
    }

    pub fn preview_filenames(&self) -> Vec<String> {
        self.previews.iter().map(|p| p.filename.clone()).collect()
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    pub fn preview(&self, index: usize) -> Option<&PreviewImage> {
        self.previews.get(index)
    }

    /// Validate and accept a selection. All-or-nothing: a selection that
    /// would exceed the limit, or that contains an oversize or non-image
    /// file, is rejected without adding anything. The first accepted local
    /// selection clears the remote image set so local files fully replace it.
    pub fn add_images(&mut self, incoming: Vec<IncomingImage>) -> Result<(), PortalError> {
        if incoming.is_empty() {
            return Ok(());
        }
        if self.previews.len() + incoming.len() > MAX_IMAGES {
            return Err(PortalError::Validation(
                "Maksimal 2 gambar dengan ukuran file maksimal 5MB.".to_string(),
            ));
        }
        for image in &incoming {
            if !image.content_type.starts_with("image/") {
                return Err(PortalError::Validation(format!(
                    "{} bukan berkas gambar.",
                    image.filename
                )));
            }
            if image.bytes.len() > MAX_IMAGE_BYTES {
                return Err(PortalError::Validation(format!(
                    "{} melebihi batas 5MB.",
                    image.filename
                )));
            }
        }

        if self.previews.is_empty() {
            self.api_images.clear();
        }
        for image in incoming {
            self.previews.push(PreviewImage::spool(image)?);
        }
        Ok(())
    }

    /// Drop the preview at `index`; its spool file is deleted immediately and
    /// the remaining previews keep their relative order.
    pub fn remove_image(&mut self, index: usize) -> Result<(), PortalError> {
        if index >= self.previews.len() {
            return Err(PortalError::Validation("Gambar tidak ditemukan.".to_string()));
        }
        self.previews.remove(index);
        Ok(())
    }

    /// Image portion of the outgoing request: all local files if any were
    /// selected, otherwise all remote references.
    pub fn payload(&self) -> std::io::Result<ImagePayload> {
        if self.previews.is_empty() {
            return Ok(ImagePayload::Remote(self.api_images.clone()));
        }
        let mut files = Vec::with_capacity(self.previews.len());
        for preview in &self.previews {
            files.push(UploadFile {
                filename: preview.filename.clone(),
                content_type: preview.content_type.clone(),
                bytes: preview.read()?,
            });
        }
        Ok(ImagePayload::Files(files))
    }
}

/// All live drafts, keyed by entity. `NEW_DRAFT_ID` keys the create form.
#[derive(Default)]
pub struct DraftRegistry {
    inner: RwLock<HashMap<DraftKey, ImageDraft>>,
}

impl DraftRegistry {
    pub fn replace(&self, key: DraftKey, draft: ImageDraft) {
        self.inner.write().insert(key, draft);
    }

    pub fn contains(&self, key: DraftKey) -> bool {
        self.inner.read().contains_key(&key)
    }

    pub fn with<R>(&self, key: DraftKey, f: impl FnOnce(&ImageDraft) -> R) -> Option<R> {
        self.inner.read().get(&key).map(f)
    }

    pub fn with_mut<R>(&self, key: DraftKey, f: impl FnOnce(&mut ImageDraft) -> R) -> Option<R> {
        self.inner.write().get_mut(&key).map(f)
    }

    /// Dispose of a draft, releasing every spool file it still holds.
    pub fn remove(&self, key: DraftKey) -> bool {
        self.inner.write().remove(&key).is_some()
    }

    /// Spool file paths currently held for a draft. Test hook.
    pub fn preview_paths(&self, key: DraftKey) -> Vec<PathBuf> {
        self.inner
            .read()
            .get(&key)
            .map(|draft| {
                (0..draft.preview_count())
                    .filter_map(|i| draft.preview(i).map(|p| p.path().to_path_buf()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
