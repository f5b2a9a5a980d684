use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::error::RepositoryError;
use super::traits::MediaRepository;
use crate::media::{FileRecord, FolderRoot, LocationRecord, NameHashEntry};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<i32, FileRecord>,
    locations: BTreeMap<i32, LocationRecord>,
    folder_roots: BTreeMap<i32, FolderRoot>,
    name_hashes: BTreeMap<i32, NameHashEntry>,
    next_file_id: i32,
    next_location_id: i32,
    next_name_hash_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Process-local repository backed by ordered maps.
///
/// IDs are assigned sequentially from 1 per record kind. Location rows are
/// unique per (root, relative path); name-hash rows are not, so duplicate
/// entries can exist the way they do in older databases.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a folder root.
    pub async fn insert_folder_root(&self, root: FolderRoot) {
        self.state.lock().await.folder_roots.insert(root.id, root);
    }

    pub async fn files(&self) -> Vec<FileRecord> {
        self.state.lock().await.files.values().cloned().collect()
    }

    pub async fn locations(&self) -> Vec<LocationRecord> {
        self.state.lock().await.locations.values().cloned().collect()
    }

    pub async fn name_hash_entries(&self) -> Vec<NameHashEntry> {
        self.state.lock().await.name_hashes.values().cloned().collect()
    }
}

#[async_trait]
impl MediaRepository for InMemoryRepository {
    async fn get_file_by_id(&self, id: i32) -> Result<Option<FileRecord>, RepositoryError> {
        Ok(self.state.lock().await.files.get(&id).cloned())
    }

    async fn get_locations_by_file_id(
        &self,
        file_id: i32,
    ) -> Result<Vec<LocationRecord>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .locations
            .values()
            .filter(|l| l.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn get_folder_root_by_id(&self, id: i32) -> Result<Option<FolderRoot>, RepositoryError> {
        Ok(self.state.lock().await.folder_roots.get(&id).cloned())
    }

    async fn get_location_by_path_and_root(
        &self,
        relative_path: &str,
        folder_root_id: i32,
    ) -> Result<Option<LocationRecord>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .locations
            .values()
            .find(|l| l.folder_root_id == folder_root_id && l.relative_path == relative_path)
            .cloned())
    }

    async fn get_name_hash_entries(
        &self,
        file_name: &str,
        file_size: i64,
    ) -> Result<Vec<NameHashEntry>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .name_hashes
            .values()
            .filter(|e| e.file_name == file_name && e.file_size == file_size)
            .cloned()
            .collect())
    }

    async fn save_file_record(
        &self,
        mut record: FileRecord,
        commit_hash_fields: bool,
    ) -> Result<FileRecord, RepositoryError> {
        let mut state = self.state.lock().await;

        if record.id == 0 {
            record.id = next_id(&mut state.next_file_id);
        } else {
            let existing = state
                .files
                .get(&record.id)
                .ok_or(RepositoryError::MissingRow {
                    entity: "file",
                    id: record.id,
                })?;
            if !commit_hash_fields {
                record.ed2k = existing.ed2k.clone();
                record.crc32 = existing.crc32.clone();
                record.md5 = existing.md5.clone();
                record.sha1 = existing.sha1.clone();
                record.hash_source = existing.hash_source;
            }
        }

        state.files.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save_location_record(
        &self,
        mut record: LocationRecord,
    ) -> Result<LocationRecord, RepositoryError> {
        let mut state = self.state.lock().await;

        let clash = state.locations.values().any(|l| {
            l.id != record.id
                && l.folder_root_id == record.folder_root_id
                && l.relative_path == record.relative_path
        });
        if clash {
            return Err(RepositoryError::Conflict(format!(
                "location ({}, {}) already exists",
                record.folder_root_id, record.relative_path
            )));
        }

        if record.id == 0 {
            record.id = next_id(&mut state.next_location_id);
        } else if !state.locations.contains_key(&record.id) {
            return Err(RepositoryError::MissingRow {
                entity: "location",
                id: record.id,
            });
        }

        state.locations.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save_name_hash_entry(
        &self,
        mut entry: NameHashEntry,
    ) -> Result<NameHashEntry, RepositoryError> {
        let mut state = self.state.lock().await;

        if entry.id == 0 {
            entry.id = next_id(&mut state.next_name_hash_id);
        } else if !state.name_hashes.contains_key(&entry.id) {
            return Err(RepositoryError::MissingRow {
                entity: "name_hash",
                id: entry.id,
            });
        }

        state.name_hashes.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete_name_hash_entries(
        &self,
        entries: &[NameHashEntry],
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        for entry in entries {
            state.name_hashes.remove(&entry.id);
        }
        Ok(())
    }
}
