use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::{file_name_hash, video_local, video_local_place};

/// Ensure required database indexes exist.
///
/// Schema sync creates tables and columns only, so composite indexes are
/// created here on startup. The unique ones bound races between processes.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One place per (import folder, relative path).
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_video_local_place_folder_path")
        .table(video_local_place::Entity)
        .col(video_local_place::Column::ImportFolderId)
        .col(video_local_place::Column::FilePath)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_video_local_place_folder_path exists");

    // One cache entry per (file name, file size).
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_file_name_hash_name_size")
        .table(file_name_hash::Entity)
        .col(file_name_hash::Column::FileName)
        .col(file_name_hash::Column::FileSize)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_file_name_hash_name_size exists");

    // Location lookups by linked file.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_video_local_place_video_local")
        .table(video_local_place::Entity)
        .col(video_local_place::Column::VideoLocalId)
        .to_string(PostgresQueryBuilder);
    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_video_local_place_video_local exists"),
        Err(e) => tracing::warn!("Failed to create index idx_video_local_place_video_local: {}", e),
    }

    // Lookups by primary hash.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_video_local_ed2k_size")
        .table(video_local::Entity)
        .col(video_local::Column::Ed2k)
        .col(video_local::Column::FileSize)
        .to_string(PostgresQueryBuilder);
    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_video_local_ed2k_size exists"),
        Err(e) => tracing::warn!("Failed to create index idx_video_local_ed2k_size: {}", e),
    }

    Ok(())
}
