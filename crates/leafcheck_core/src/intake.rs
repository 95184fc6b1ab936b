//! File intake: the single staged image and its preview handle.

/// Supported image file extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

/// Check if a filename has a supported image extension.
/// Works with both full paths and just filenames.
pub fn is_image_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// The image currently staged for submission.
///
/// `F` is the platform's file handle (a `web_sys::File` in the browser). The
/// preview URL was acquired for this file by the shell; the controller hands it
/// back for release when the file is replaced or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<F> {
    handle: F,
    name: String,
    preview_url: String,
}

impl<F> SelectedFile<F> {
    pub fn new(handle: F, name: impl Into<String>, preview_url: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            preview_url: preview_url.into(),
        }
    }

    pub fn handle(&self) -> &F {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    /// Give up the file, keeping only the preview URL that must be released.
    pub fn into_preview_url(self) -> String {
        self.preview_url
    }
}
