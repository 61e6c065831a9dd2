use crate::ports::outbound::OutputPresenter;
use crate::shared::error::ArkitectoError;
use crate::shared::security::validate_output_path;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// FileSystemWriter adapter for saving rendered budgets, exports and renders
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(ArkitectoError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &[u8]) -> Result<()> {
        self.validate_parent_directory()?;
        validate_output_path(&self.output_path)?;

        fs::write(&self.output_path, content).map_err(|e| ArkitectoError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        info!(path = %self.output_path.display(), bytes = content.len(), "output written");
        eprintln!("✅ Saved: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing text output to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &[u8]) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        if !content.ends_with(b"\n") {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
