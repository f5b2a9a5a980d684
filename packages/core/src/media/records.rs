use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a file record's hashes came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashSource {
    /// Hashes were computed from (or asserted for) the file contents.
    #[default]
    DirectHash,
    /// Hashes were guessed from the file name + size cache.
    FileNameCache,
}

impl HashSource {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::DirectHash => 1,
            Self::FileNameCache => 2,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::DirectHash),
            2 => Some(Self::FileNameCache),
            _ => None,
        }
    }
}

/// Role of a folder root in the import pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolderRootType {
    Excluded,
    Source,
    Destination,
    Both,
}

impl FolderRootType {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Excluded => 0,
            Self::Source => 1,
            Self::Destination => 2,
            Self::Both => 3,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Excluded),
            1 => Some(Self::Source),
            2 => Some(Self::Destination),
            3 => Some(Self::Both),
            _ => None,
        }
    }
}

/// A distinct media file, identified by its content hashes.
///
/// Hash fields are either empty or uppercase hex of the canonical length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    /// Storage-assigned ID; 0 until first saved.
    pub id: i32,
    pub ed2k: String,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
    pub hash_source: HashSource,
    pub file_size: i64,
    /// Display name, the final segment of the path it was registered under.
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub imported_at: Option<DateTime<Utc>>,
    pub is_ignored: bool,
    pub is_variation: bool,
}

impl FileRecord {
    /// A record that has not been persisted yet, with empty hashes.
    pub fn new_unsaved(
        file_name: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        imported_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: 0,
            ed2k: String::new(),
            crc32: String::new(),
            md5: String::new(),
            sha1: String::new(),
            hash_source: HashSource::default(),
            file_size: 0,
            file_name: file_name.into(),
            created_at,
            updated_at,
            imported_at,
            is_ignored: false,
            is_variation: false,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// One placement of a file under a folder root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRecord {
    /// Storage-assigned ID; 0 until first saved.
    pub id: i32,
    pub folder_root_id: i32,
    /// Path relative to the folder root.
    pub relative_path: String,
    /// Linked file record ID; 0 while unlinked.
    pub file_id: i32,
    /// Copied from the folder root when the location is linked.
    pub root_type: Option<FolderRootType>,
}

impl LocationRecord {
    pub fn new_unlinked(folder_root_id: i32, relative_path: impl Into<String>) -> Self {
        Self {
            id: 0,
            folder_root_id,
            relative_path: relative_path.into(),
            file_id: 0,
            root_type: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.file_id != 0
    }

    pub fn file_name(&self) -> &str {
        file_name_of(&self.relative_path)
    }
}

/// A configured root directory. Read-only for the registrar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRoot {
    pub id: i32,
    pub name: String,
    /// Absolute location on disk.
    pub location: String,
    pub root_type: FolderRootType,
}

/// Cache entry mapping (file name, file size) to an ED2K hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameHashEntry {
    /// Storage-assigned ID; 0 until first saved.
    pub id: i32,
    pub file_name: String,
    pub file_size: i64,
    pub hash: String,
    pub updated_at: DateTime<Utc>,
}

impl NameHashEntry {
    pub fn new_unsaved(
        file_name: impl Into<String>,
        file_size: i64,
        hash: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            file_name: file_name.into(),
            file_size,
            hash: hash.into(),
            updated_at,
        }
    }
}

/// Final segment of a relative path, accepting either separator.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or_default()
}
