//! Upload and rename form state.

use crate::services::api::ImageUpload;
use mirror_api_models::Image;
use thiserror::Error;

/// Client-side validation failure, raised before any request is built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field was left empty.
    #[error("{0} is required")]
    Missing(&'static str),
}

/// File picked in the upload dialog, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name reported by the browser.
    pub name: String,
    /// MIME type reported by the browser, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Upload dialog inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    /// Title input.
    pub title: String,
    /// Picked file.
    pub file: Option<SelectedFile>,
}

impl UploadForm {
    /// Check required fields and build the upload payload.
    ///
    /// # Errors
    /// Returns [`FormError::Missing`] for a blank title or a missing file.
    pub fn validate(&self) -> Result<ImageUpload, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Missing("title"));
        }
        let file = self.file.as_ref().ok_or(FormError::Missing("file"))?;
        Ok(ImageUpload {
            title: title.to_string(),
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        })
    }
}

/// Rename dialog inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameForm {
    /// Image being renamed.
    pub id: i64,
    /// Title before editing, shown for reference.
    pub current_title: String,
    /// New title input.
    pub title: String,
}

impl RenameForm {
    /// Prefill the dialog from an image.
    #[must_use]
    pub fn for_image(image: &Image) -> Self {
        Self {
            id: image.id,
            current_title: image.title.clone(),
            title: image.title.clone(),
        }
    }

    /// Check the title and return the trimmed value.
    ///
    /// # Errors
    /// Returns [`FormError::Missing`] for a blank title.
    pub fn validate(&self) -> Result<String, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Missing("title"));
        }
        Ok(title.to_string())
    }
}
