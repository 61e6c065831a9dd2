use crate::shared::Result;

/// OutputPresenter port: where a finished artifact ends up
///
/// Artifacts are budget summaries, exported PDF/Excel/text documents and
/// generated renders. Text and binary content go through the same call.
pub trait OutputPresenter {
    /// Delivers the artifact
    ///
    /// # Errors
    /// Fails when the destination cannot be written, including when a file
    /// destination is a symbolic link or its parent directory is missing.
    fn present(&self, content: &[u8]) -> Result<()>;
}
