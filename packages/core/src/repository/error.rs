use std::fmt;

/// Errors surfaced by a [`MediaRepository`](super::MediaRepository) backend.
#[derive(Debug)]
pub enum RepositoryError {
    /// The backing database failed the query.
    Database(String),
    /// An update targeted a row that does not exist.
    MissingRow { entity: &'static str, id: i32 },
    /// A write would violate a uniqueness constraint.
    Conflict(String),
    /// A stored value cannot be mapped onto the domain model.
    Corrupt(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(msg) => write!(f, "database error: {msg}"),
            Self::MissingRow { entity, id } => write!(f, "{entity} row {id} does not exist"),
            Self::Conflict(msg) => write!(f, "uniqueness conflict: {msg}"),
            Self::Corrupt(msg) => write!(f, "corrupt stored value: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}
