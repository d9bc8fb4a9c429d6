//! Transactional content editor for Project and Travel galleries.

mod content_editor;
mod session;

pub use content_editor::{
    CleanupWarning, ContentEditor, ProgressSink, SaveError, SaveReport, UploadProgress,
};
pub use session::EditSession;
