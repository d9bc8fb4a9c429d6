//! Editor-side working state for one gallery record.

use folio_core::image::{
    DEFAULT_MAX_IMAGE_BYTES, GalleryFields, ImageRejection, ImageState, StagedFile, validate_image,
};

/// Image staging state of an open editor.
///
/// A session starts either empty (new record) or from a persisted record's
/// image list. Files are staged locally and only reach object storage when
/// the editor saves. The session survives failed saves, so a retry reuses
/// the record created by the first attempt.
#[derive(Debug, Clone)]
pub struct EditSession {
    entity_id: Option<String>,
    images: Vec<ImageState>,
    max_image_bytes: usize,
}

impl EditSession {
    /// Session for a record that does not exist yet.
    pub fn new() -> Self {
        Self {
            entity_id: None,
            images: Vec::new(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Session editing an existing record.
    pub fn for_record<F: GalleryFields>(entity_id: impl Into<String>, fields: &F) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            images: fields.images().iter().map(ImageState::persisted).collect(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Id of the edited record, once it exists.
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn images(&self) -> &[ImageState] {
        &self.images
    }

    /// Images still shown in the editor (not marked for deletion).
    pub fn visible_images(&self) -> impl Iterator<Item = &ImageState> {
        self.images.iter().filter(|image| !image.is_deleted)
    }

    /// Stages a picked file after checking its type and size.
    pub fn stage_file(&mut self, file: StagedFile) -> Result<(), ImageRejection> {
        validate_image(&file, self.max_image_bytes)?;
        tracing::debug!(target: "editor", "Staged {:?}", file);
        self.images.push(ImageState::staged(file));
        Ok(())
    }

    /// Stages every acceptable file and returns the rejected ones.
    pub fn stage_files(
        &mut self,
        files: impl IntoIterator<Item = StagedFile>,
    ) -> Vec<ImageRejection> {
        files
            .into_iter()
            .filter_map(|file| self.stage_file(file).err())
            .collect()
    }

    /// Removes the image at `index`.
    ///
    /// A staged file that never reached storage is dropped outright. A
    /// stored image is only marked; the next successful save deletes it.
    /// Returns false if there is no image at `index`.
    pub fn remove_image(&mut self, index: usize) -> bool {
        let Some(image) = self.images.get_mut(index) else {
            return false;
        };
        if image.is_new && !image.is_uploaded {
            self.images.remove(index);
        } else {
            image.is_deleted = true;
        }
        true
    }

    /// Removes the image with the given URL, see [`Self::remove_image`].
    pub fn remove_url(&mut self, url: &str) -> bool {
        match self.images.iter().position(|image| image.url == url) {
            Some(index) => self.remove_image(index),
            None => false,
        }
    }

    /// Clears the deletion mark on the image at `index`.
    pub fn undo_remove(&mut self, index: usize) -> bool {
        match self.images.get_mut(index) {
            Some(image) if image.is_deleted => {
                image.is_deleted = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_entity_id(&mut self, entity_id: String) {
        self.entity_id = Some(entity_id);
    }

    /// Replaces the working state after a successful save.
    pub(crate) fn commit(&mut self, persisted: &[String]) {
        self.images = persisted.iter().map(ImageState::persisted).collect();
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::project::ProjectFields;

    fn png(name: &str) -> StagedFile {
        StagedFile::new(name, "image/png", vec![0u8; 16])
    }

    #[test]
    fn test_remove_staged_drops_and_persisted_marks() {
        let fields = ProjectFields {
            images: vec!["https://cdn/x.png".to_string()],
            ..Default::default()
        };
        let mut session = EditSession::for_record("p1", &fields);
        session.stage_file(png("new.png")).unwrap();
        assert_eq!(session.images().len(), 2);

        assert!(session.remove_image(1));
        assert_eq!(session.images().len(), 1);

        assert!(session.remove_image(0));
        assert!(session.images()[0].is_deleted);
        assert_eq!(session.visible_images().count(), 0);

        assert!(session.undo_remove(0));
        assert!(!session.images()[0].is_deleted);
        assert!(!session.undo_remove(0));
    }

    #[test]
    fn test_stage_files_reports_rejections() {
        let mut session = EditSession::new().with_max_image_bytes(8);
        let rejected = session.stage_files([
            png("big.png"),
            StagedFile::new("doc.pdf", "application/pdf", vec![1]),
            StagedFile::new("ok.gif", "image/gif", vec![1]),
        ]);

        assert_eq!(rejected.len(), 2);
        assert_eq!(session.images().len(), 1);
        assert!(session.images()[0].needs_upload());
    }
}
