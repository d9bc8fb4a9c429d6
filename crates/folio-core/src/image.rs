//! Image staging model for gallery editors.
//!
//! An edit session holds one [`ImageState`] per image shown in the editor.
//! Persisted images start as `uploaded`; files picked in the editor start as
//! `new` and only receive a storage URL once a save uploads them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content types accepted for gallery images.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Default upper bound for a single image (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL scheme used for images that exist only in the editor.
pub const STAGED_URL_SCHEME: &str = "staged:";

/// Record types that own an image gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    Project,
    Travel,
}

impl GalleryKind {
    /// Prefix used when generating unique file names.
    pub fn prefix(&self) -> &'static str {
        match self {
            GalleryKind::Project => "project",
            GalleryKind::Travel => "travel",
        }
    }

    /// Storage path for an image owned by `entity_id`.
    ///
    /// ```
    /// use folio_core::image::GalleryKind;
    ///
    /// assert_eq!(
    ///     GalleryKind::Project.image_path("p1", "a.png"),
    ///     "projects/p1/images/a.png"
    /// );
    /// ```
    pub fn image_path(&self, entity_id: &str, file_name: &str) -> String {
        format!("{}s/{}/images/{}", self.prefix(), entity_id, file_name)
    }
}

/// The writable fields of a record that owns an image gallery.
pub trait GalleryFields: Clone + Send + Sync + 'static {
    const KIND: GalleryKind;

    fn images(&self) -> &[String];

    fn set_images(&mut self, images: Vec<String>);

    /// Form-level validation; must not have side effects.
    fn validate(&self) -> Result<()>;
}

/// A file selected in the editor, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Why a picked file was not staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRejection {
    UnsupportedType { name: String, content_type: String },
    TooLarge { name: String, size: usize, max: usize },
}

impl fmt::Display for ImageRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRejection::UnsupportedType { name, content_type } => {
                write!(f, "{name}: unsupported image type '{content_type}'")
            }
            ImageRejection::TooLarge { name, size, max } => {
                write!(f, "{name}: {size} bytes exceeds the {max} byte limit")
            }
        }
    }
}

/// Checks the content type and size of a picked file.
pub fn validate_image(
    file: &StagedFile,
    max_bytes: usize,
) -> std::result::Result<(), ImageRejection> {
    let content_type = file.content_type.to_ascii_lowercase();
    if !ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(ImageRejection::UnsupportedType {
            name: file.name.clone(),
            content_type: file.content_type.clone(),
        });
    }
    if file.size() > max_bytes {
        return Err(ImageRejection::TooLarge {
            name: file.name.clone(),
            size: file.size(),
            max: max_bytes,
        });
    }
    Ok(())
}

/// One image's position in the staging lifecycle of an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageState {
    /// Storage URL, or a `staged:` placeholder for files not yet uploaded.
    pub url: String,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_uploaded: bool,
    pub source: Option<StagedFile>,
}

impl ImageState {
    /// State for an image already referenced by the persisted record.
    pub fn persisted(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_new: false,
            is_deleted: false,
            is_uploaded: true,
            source: None,
        }
    }

    /// State for a file picked in the editor.
    pub fn staged(file: StagedFile) -> Self {
        Self {
            url: format!("{}{}", STAGED_URL_SCHEME, file.name),
            is_new: true,
            is_deleted: false,
            is_uploaded: false,
            source: Some(file),
        }
    }

    /// Whether the next save has to upload this image.
    pub fn needs_upload(&self) -> bool {
        self.is_new && !self.is_deleted && !self.is_uploaded
    }

    /// Whether the next successful save has to delete the stored object.
    pub fn needs_cleanup(&self) -> bool {
        self.is_deleted && !self.is_new
    }
}
