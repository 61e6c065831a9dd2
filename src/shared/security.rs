use crate::shared::error::ArkitectoError;
use crate::shared::AppResult;
use std::fs;
use std::path::Path;

/// Largest photo accepted for analysis or sketch generation (20 MB)
pub const MAX_IMAGE_SIZE: u64 = 20 * 1024 * 1024;

/// Largest token file read by the credential provider (64 KB)
pub const MAX_TOKEN_FILE_SIZE: u64 = 64 * 1024;

/// Largest configuration file accepted (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

fn security_error(path: &Path, reason: String, hint: &str) -> ArkitectoError {
    ArkitectoError::SecurityError {
        path: path.to_path_buf(),
        reason,
        hint: hint.to_string(),
    }
}

/// Checks that a file we are about to read is a regular file within the size limit.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Returns
/// The file size in bytes
///
/// # Errors
/// - [`ArkitectoError::FileReadError`] when the metadata cannot be read
/// - [`ArkitectoError::SecurityError`] for symlinks, non-regular files and oversized files
pub fn validate_input_file(path: &Path, description: &str, max_size: u64) -> AppResult<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ArkitectoError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(security_error(
            path,
            format!("{} is a symbolic link", description),
            "Pass the path of the real file instead of a link to it",
        ));
    }

    if !metadata.is_file() {
        return Err(security_error(
            path,
            format!("{} is not a regular file", description),
            "Pass the path of a file, not a directory or device",
        ));
    }

    let size = metadata.len();
    if size > max_size {
        return Err(security_error(
            path,
            format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes",
                description, size, max_size
            ),
            "Use a smaller file",
        ));
    }

    Ok(size)
}

/// Refuses to write through a symbolic link. A path that does not exist yet is fine.
pub fn validate_output_path(path: &Path) -> AppResult<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(security_error(
            path,
            "output path is a symbolic link".to_string(),
            "Choose an output path that is not a symbolic link",
        )),
        Ok(metadata) if metadata.is_dir() => Err(security_error(
            path,
            "output path is a directory".to_string(),
            "Include a file name in the output path",
        )),
        _ => Ok(()),
    }
}
