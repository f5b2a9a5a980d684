use async_trait::async_trait;
use registrar_core::media::{
    FileRecord, FolderRoot, FolderRootType, HashSource, LocationRecord, NameHashEntry,
};
use registrar_core::repository::{MediaRepository, RepositoryError};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::entity::{file_name_hash, import_folder, video_local, video_local_place};

/// [`MediaRepository`] over the relational store.
#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(entity: &'static str, id: i32) -> impl FnOnce(DbErr) -> RepositoryError {
    move |e| match e {
        DbErr::RecordNotUpdated => RepositoryError::MissingRow { entity, id },
        e => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Conflict(detail),
            _ => RepositoryError::Database(e.to_string()),
        },
    }
}

fn read_err(e: DbErr) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn file_from_model(m: video_local::Model) -> Result<FileRecord, RepositoryError> {
    let hash_source = HashSource::from_i32(m.hash_source).ok_or_else(|| {
        RepositoryError::Corrupt(format!(
            "video_local {} has unknown hash_source {}",
            m.id, m.hash_source
        ))
    })?;

    Ok(FileRecord {
        id: m.id,
        ed2k: m.ed2k,
        crc32: m.crc32,
        md5: m.md5,
        sha1: m.sha1,
        hash_source,
        file_size: m.file_size,
        file_name: m.file_name,
        created_at: m.created_at,
        updated_at: m.updated_at,
        imported_at: m.imported_at,
        is_ignored: m.is_ignored,
        is_variation: m.is_variation,
    })
}

fn location_from_model(m: video_local_place::Model) -> LocationRecord {
    LocationRecord {
        id: m.id,
        folder_root_id: m.import_folder_id,
        relative_path: m.file_path,
        file_id: m.video_local_id,
        root_type: m.import_folder_type.and_then(FolderRootType::from_i32),
    }
}

fn folder_root_from_model(m: import_folder::Model) -> Result<FolderRoot, RepositoryError> {
    let root_type = FolderRootType::from_i32(m.folder_type).ok_or_else(|| {
        RepositoryError::Corrupt(format!(
            "import_folder {} has unknown folder_type {}",
            m.id, m.folder_type
        ))
    })?;

    Ok(FolderRoot {
        id: m.id,
        name: m.name,
        location: m.location,
        root_type,
    })
}

fn name_hash_from_model(m: file_name_hash::Model) -> NameHashEntry {
    NameHashEntry {
        id: m.id,
        file_name: m.file_name,
        file_size: m.file_size,
        hash: m.hash,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl MediaRepository for SeaOrmRepository {
    async fn get_file_by_id(&self, id: i32) -> Result<Option<FileRecord>, RepositoryError> {
        video_local::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_err)?
            .map(file_from_model)
            .transpose()
    }

    async fn get_locations_by_file_id(
        &self,
        file_id: i32,
    ) -> Result<Vec<LocationRecord>, RepositoryError> {
        let rows = video_local_place::Entity::find()
            .filter(video_local_place::Column::VideoLocalId.eq(file_id))
            .order_by_asc(video_local_place::Column::Id)
            .all(&self.db)
            .await
            .map_err(read_err)?;
        Ok(rows.into_iter().map(location_from_model).collect())
    }

    async fn get_folder_root_by_id(&self, id: i32) -> Result<Option<FolderRoot>, RepositoryError> {
        import_folder::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_err)?
            .map(folder_root_from_model)
            .transpose()
    }

    async fn get_location_by_path_and_root(
        &self,
        relative_path: &str,
        folder_root_id: i32,
    ) -> Result<Option<LocationRecord>, RepositoryError> {
        let row = video_local_place::Entity::find()
            .filter(video_local_place::Column::ImportFolderId.eq(folder_root_id))
            .filter(video_local_place::Column::FilePath.eq(relative_path))
            .one(&self.db)
            .await
            .map_err(read_err)?;
        Ok(row.map(location_from_model))
    }

    async fn get_name_hash_entries(
        &self,
        file_name: &str,
        file_size: i64,
    ) -> Result<Vec<NameHashEntry>, RepositoryError> {
        let rows = file_name_hash::Entity::find()
            .filter(file_name_hash::Column::FileName.eq(file_name))
            .filter(file_name_hash::Column::FileSize.eq(file_size))
            .order_by_asc(file_name_hash::Column::Id)
            .all(&self.db)
            .await
            .map_err(read_err)?;
        Ok(rows.into_iter().map(name_hash_from_model).collect())
    }

    async fn save_file_record(
        &self,
        record: FileRecord,
        commit_hash_fields: bool,
    ) -> Result<FileRecord, RepositoryError> {
        let id = record.id;
        let write_hashes = commit_hash_fields || record.is_new();
        let hash = |value: String| if write_hashes { Set(value) } else { NotSet };

        let active = video_local::ActiveModel {
            id: if record.is_new() { NotSet } else { Unchanged(id) },
            ed2k: hash(record.ed2k),
            crc32: hash(record.crc32),
            md5: hash(record.md5),
            sha1: hash(record.sha1),
            hash_source: if write_hashes {
                Set(record.hash_source.as_i32())
            } else {
                NotSet
            },
            file_size: Set(record.file_size),
            file_name: Set(record.file_name),
            is_ignored: Set(record.is_ignored),
            is_variation: Set(record.is_variation),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
            imported_at: Set(record.imported_at),
            ..Default::default()
        };

        let saved = if id == 0 {
            active.insert(&self.db).await
        } else {
            active.update(&self.db).await
        }
        .map_err(map_db_err("file", id))?;

        file_from_model(saved)
    }

    async fn save_location_record(
        &self,
        record: LocationRecord,
    ) -> Result<LocationRecord, RepositoryError> {
        let id = record.id;
        let active = video_local_place::ActiveModel {
            id: if id == 0 { NotSet } else { Unchanged(id) },
            video_local_id: Set(record.file_id),
            import_folder_id: Set(record.folder_root_id),
            file_path: Set(record.relative_path),
            import_folder_type: Set(record.root_type.map(FolderRootType::as_i32)),
            ..Default::default()
        };

        let saved = if id == 0 {
            active.insert(&self.db).await
        } else {
            active.update(&self.db).await
        }
        .map_err(map_db_err("location", id))?;

        Ok(location_from_model(saved))
    }

    async fn save_name_hash_entry(
        &self,
        entry: NameHashEntry,
    ) -> Result<NameHashEntry, RepositoryError> {
        let id = entry.id;
        let active = file_name_hash::ActiveModel {
            id: if id == 0 { NotSet } else { Unchanged(id) },
            file_name: Set(entry.file_name),
            file_size: Set(entry.file_size),
            hash: Set(entry.hash),
            updated_at: Set(entry.updated_at),
            ..Default::default()
        };

        let saved = if id == 0 {
            active.insert(&self.db).await
        } else {
            active.update(&self.db).await
        }
        .map_err(map_db_err("name_hash", id))?;

        Ok(name_hash_from_model(saved))
    }

    async fn delete_name_hash_entries(
        &self,
        entries: &[NameHashEntry],
    ) -> Result<(), RepositoryError> {
        if entries.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = entries.iter().map(|e| e.id).collect();
        file_name_hash::Entity::delete_many()
            .filter(file_name_hash::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(read_err)?;
        Ok(())
    }
}
