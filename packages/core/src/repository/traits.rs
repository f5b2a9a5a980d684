use async_trait::async_trait;

use super::error::RepositoryError;
use crate::media::{FileRecord, FolderRoot, LocationRecord, NameHashEntry};

/// Persistence operations the registrar needs.
///
/// Each call is expected to be atomic on its own; nothing here spans a
/// transaction.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn get_file_by_id(&self, id: i32) -> Result<Option<FileRecord>, RepositoryError>;

    /// All locations linked to a file, ordered by location ID.
    async fn get_locations_by_file_id(
        &self,
        file_id: i32,
    ) -> Result<Vec<LocationRecord>, RepositoryError>;

    async fn get_folder_root_by_id(&self, id: i32) -> Result<Option<FolderRoot>, RepositoryError>;

    async fn get_location_by_path_and_root(
        &self,
        relative_path: &str,
        folder_root_id: i32,
    ) -> Result<Option<LocationRecord>, RepositoryError>;

    /// Entries for a (name, size) pair, ordered by entry ID.
    ///
    /// More than one entry is a repair case for the caller.
    async fn get_name_hash_entries(
        &self,
        file_name: &str,
        file_size: i64,
    ) -> Result<Vec<NameHashEntry>, RepositoryError>;

    /// Insert (ID 0) or update a file record and return the stored row.
    ///
    /// When `commit_hash_fields` is false an existing row keeps its hashes
    /// and hash source.
    async fn save_file_record(
        &self,
        record: FileRecord,
        commit_hash_fields: bool,
    ) -> Result<FileRecord, RepositoryError>;

    /// Insert (ID 0) or update a location record and return the stored row.
    async fn save_location_record(
        &self,
        record: LocationRecord,
    ) -> Result<LocationRecord, RepositoryError>;

    /// Insert (ID 0) or update a name-hash entry and return the stored row.
    async fn save_name_hash_entry(
        &self,
        entry: NameHashEntry,
    ) -> Result<NameHashEntry, RepositoryError>;

    async fn delete_name_hash_entries(
        &self,
        entries: &[NameHashEntry],
    ) -> Result<(), RepositoryError>;
}
