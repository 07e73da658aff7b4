use std::path::{Path, PathBuf};

/// A captured artifact ready to be shared, together with the commit it
/// belongs to.
///
/// Supplied once per upload attempt by the host. The artifact file is owned
/// by the host and must stay on disk, unmodified, until the upload finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Path of the captured image on disk.
    pub artifact_path: PathBuf,

    /// Commit SHA; used as the remote filename.
    pub sha: String,

    /// Commit message.
    pub message: String,

    /// Display name of the repository the commit was made in.
    pub repo_name: String,
}

impl UploadTarget {
    pub fn new(
        artifact_path: impl Into<PathBuf>,
        sha: impl Into<String>,
        message: impl Into<String>,
        repo_name: impl Into<String>,
    ) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            sha: sha.into(),
            message: message.into(),
            repo_name: repo_name.into(),
        }
    }

    /// Title shown alongside the shared file: `"<message>[<repo>]"`.
    pub fn title(&self) -> String {
        format!("{}[{}]", self.message, self.repo_name)
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}
