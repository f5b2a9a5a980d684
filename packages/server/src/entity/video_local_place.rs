use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A file placed under an import folder. Unique per (import_folder_id, file_path).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video_local_place")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Linked `video_local` row; 0 while unlinked.
    pub video_local_id: i32,
    pub import_folder_id: i32,
    /// Relative to the import folder, `/`-separated.
    pub file_path: String,
    /// Copied from the import folder when the place is linked.
    pub import_folder_type: Option<i32>,
}

impl ActiveModelBehavior for ActiveModel {}
