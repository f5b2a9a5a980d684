use std::fmt;

/// The four digests stored on a file record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    Ed2k,
    Crc32,
    Md5,
    Sha1,
}

impl HashKind {
    pub const ALL: [HashKind; 4] = [Self::Ed2k, Self::Crc32, Self::Md5, Self::Sha1];

    /// Number of hex characters in the canonical encoding.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Ed2k => 32,
            Self::Crc32 => 8,
            Self::Md5 => 32,
            Self::Sha1 => 40,
        }
    }

    /// Field name inside the request's `hashes` object.
    pub fn field(self) -> &'static str {
        match self {
            Self::Ed2k => "hashes.ed2k",
            Self::Crc32 => "hashes.crc32",
            Self::Md5 => "hashes.md5",
            Self::Sha1 => "hashes.sha1",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ed2k => "ED2K",
            Self::Crc32 => "CRC32",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
        };
        f.write_str(name)
    }
}

/// Trim and uppercase a hash. Blank input becomes the empty string.
pub fn normalize_hash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed.to_uppercase()
}

/// Check that a caller-supplied hash is present and has the canonical hex length.
pub fn validate_hash(kind: HashKind, value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(format!("{kind} hash is required"));
    }

    if trimmed.len() != kind.hex_len() {
        return Err(format!(
            "{kind} hash must be {} hex characters, got {}",
            kind.hex_len(),
            trimmed.len()
        ));
    }

    hex::decode(trimmed).map_err(|e| format!("{kind} hash is not valid hex: {e}"))?;

    Ok(())
}
