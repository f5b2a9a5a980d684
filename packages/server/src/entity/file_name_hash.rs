use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_name_hash")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub file_name: String,
    pub file_size: i64,
    /// ED2K of the file last registered under this name and size.
    pub hash: String,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
