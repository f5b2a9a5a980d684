mod hash;
mod records;

pub use hash::{HashKind, normalize_hash, validate_hash};
pub use records::{
    FileRecord, FolderRoot, FolderRootType, HashSource, LocationRecord, NameHashEntry,
    file_name_of,
};
