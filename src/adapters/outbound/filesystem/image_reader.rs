use crate::ports::outbound::ImageUpload;
use crate::shared::error::ArkitectoError;
use crate::shared::security::{validate_input_file, MAX_IMAGE_SIZE};
use crate::shared::AppResult;
use std::fs;
use std::path::Path;
use tracing::debug;

/// ImageFileReader adapter that loads site photos for upload
pub struct ImageFileReader {
    max_size: u64,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_IMAGE_SIZE,
        }
    }

    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// MIME type inferred from the file extension
    pub fn mime_type_for(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "webp" => Some("image/webp"),
            "gif" => Some("image/gif"),
            "heic" => Some("image/heic"),
            _ => None,
        }
    }

    /// Reads an image with symlink and size checks
    pub fn read(&self, path: &Path) -> AppResult<ImageUpload> {
        let mime_type = Self::mime_type_for(path).ok_or_else(|| {
            ArkitectoError::validation(
                "image",
                format!(
                    "unsupported file type: {}. Use a JPEG, PNG, WebP, GIF or HEIC photo",
                    path.display()
                ),
            )
        })?;

        validate_input_file(path, "image", self.max_size)?;

        let bytes = fs::read(path).map_err(|e| ArkitectoError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        debug!(file = %file_name, bytes = bytes.len(), mime = mime_type, "image loaded");
        Ok(ImageUpload::new(file_name, mime_type, bytes))
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}
