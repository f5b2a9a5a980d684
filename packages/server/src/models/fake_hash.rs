use chrono::{DateTime, Utc};
use registrar_core::media::HashSource;
use registrar_core::{FakeHashes, Registration, RegistrationResult};
use serde::{Deserialize, Serialize};

/// Where the supplied hashes came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub enum HashSourceBody {
    #[default]
    DirectHash,
    FileNameCache,
}

impl From<HashSourceBody> for HashSource {
    fn from(value: HashSourceBody) -> Self {
        match value {
            HashSourceBody::DirectHash => HashSource::DirectHash,
            HashSourceBody::FileNameCache => HashSource::FileNameCache,
        }
    }
}

/// The four digests, hex encoded. Case and surrounding whitespace are ignored.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct FakeHashesBody {
    #[serde(default, alias = "ED2K")]
    #[schema(example = "0123456789ABCDEF0123456789ABCDEF")]
    pub ed2k: String,
    #[serde(default, alias = "CRC32")]
    #[schema(example = "89ABCDEF")]
    pub crc32: String,
    #[serde(default, alias = "MD5")]
    #[schema(example = "FEDCBA9876543210FEDCBA9876543210")]
    pub md5: String,
    #[serde(default, alias = "SHA1")]
    #[schema(example = "0123456789ABCDEF0123456789ABCDEF01234567")]
    pub sha1: String,
}

/// Register hashes for a file without hashing it.
///
/// Identify the file by `fileID`, by `importFolderID` + `filePath`, or both.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FakeHashRequest {
    /// Existing file record to update.
    #[serde(rename = "fileID")]
    #[schema(example = 12)]
    pub file_id: Option<i32>,
    /// Import folder the path is resolved against.
    #[serde(rename = "importFolderID")]
    #[schema(example = 1)]
    pub import_folder_id: Option<i32>,
    /// Absolute, or relative to the import folder.
    #[schema(example = "Show/ep01.mkv")]
    pub file_path: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    #[schema(example = 104857600)]
    pub file_size: i64,
    pub hashes: Option<FakeHashesBody>,
    #[serde(default)]
    pub hash_source: HashSourceBody,
    pub date_created: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
    pub date_imported: Option<DateTime<Utc>>,
}

impl From<FakeHashRequest> for Registration {
    fn from(req: FakeHashRequest) -> Self {
        Registration {
            file_id: req.file_id,
            import_folder_id: req.import_folder_id,
            file_path: req.file_path,
            file_size: req.file_size,
            hashes: req.hashes.map(|h| FakeHashes {
                ed2k: h.ed2k,
                crc32: h.crc32,
                md5: h.md5,
                sha1: h.sha1,
            }),
            hash_source: req.hash_source.into(),
            date_created: req.date_created,
            date_updated: req.date_updated,
            date_imported: req.date_imported,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FakeHashResponse {
    #[serde(rename = "fileID")]
    #[schema(example = 1)]
    pub file_id: i32,
    #[serde(rename = "fileLocationID")]
    #[schema(example = 1)]
    pub file_location_id: i32,
}

impl From<RegistrationResult> for FakeHashResponse {
    fn from(r: RegistrationResult) -> Self {
        Self {
            file_id: r.file_id,
            file_location_id: r.file_location_id,
        }
    }
}
