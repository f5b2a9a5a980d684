use thiserror::Error;

use crate::repository::RepositoryError;

/// Failure of a fake-hash registration. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("{message}")]
    InputValidation {
        field: Option<&'static str>,
        message: String,
    },

    #[error("No File entry for the given fileID={0}.")]
    UnknownFile(i32),

    #[error("No ImportFolder entry for the given importFolderID={0}.")]
    UnknownFolderRoot(i32),

    #[error("The provided filePath is not within the given import folder: {path}")]
    PathEscape { path: String },

    #[error("The provided filePath resolved to an empty path.")]
    EmptyRelativePath,

    #[error(
        "The provided fileID={file_id} does not match the existing file location (linked to fileID={linked_file_id})."
    )]
    IdentityConflict { file_id: i32, linked_file_id: i32 },

    #[error("{0}")]
    UnresolvableLocation(String),

    #[error("Registration was cancelled.")]
    Cancelled,

    #[error("Registration exceeded its deadline.")]
    DeadlineExceeded,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl RegistrarError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InputValidation {
            field: Some(field),
            message: message.into(),
        }
    }

    /// Request field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InputValidation { field, .. } => *field,
            Self::UnknownFile(_) => Some("fileID"),
            Self::UnknownFolderRoot(_) => Some("importFolderID"),
            Self::PathEscape { .. } | Self::EmptyRelativePath => Some("filePath"),
            Self::IdentityConflict { .. } => Some("fileID"),
            _ => None,
        }
    }
}
