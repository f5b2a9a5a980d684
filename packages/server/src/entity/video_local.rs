use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A distinct media file and its content hashes.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video_local")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub ed2k: String,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
    /// `HashSource` code: 1 direct hash, 2 file name cache.
    pub hash_source: i32,
    pub file_size: i64,
    pub file_name: String,

    pub is_ignored: bool,
    pub is_variation: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub imported_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
