//! Fake-hash registration: record caller-supplied hashes for a file and
//! reconcile them with the file/location records already in storage.

mod context;
mod error;
pub mod locks;
mod path;
mod reconcile;
mod upsert;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

pub use context::OperationContext;
pub use error::RegistrarError;
pub use locks::{IdentityGuard, IdentityKey, IdentityLocks};
pub use path::resolve_relative_path;
pub use reconcile::{Reconciled, reconcile};
pub use upsert::commit;

use crate::config::RegistrarConfig;
use crate::media::{HashKind, HashSource, LocationRecord, validate_hash};
use crate::repository::MediaRepository;

/// The four caller-supplied digests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FakeHashes {
    pub ed2k: String,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
}

impl FakeHashes {
    pub fn get(&self, kind: HashKind) -> &str {
        match kind {
            HashKind::Ed2k => &self.ed2k,
            HashKind::Crc32 => &self.crc32,
            HashKind::Md5 => &self.md5,
            HashKind::Sha1 => &self.sha1,
        }
    }
}

/// One fake-hash registration request.
#[derive(Clone, Debug, Default)]
pub struct Registration {
    pub file_id: Option<i32>,
    pub import_folder_id: Option<i32>,
    pub file_path: Option<String>,
    pub file_size: i64,
    pub hashes: Option<FakeHashes>,
    pub hash_source: HashSource,
    pub date_created: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
    pub date_imported: Option<DateTime<Utc>>,
}

impl Registration {
    /// Root ID and path, when both are present and the path is not blank.
    pub fn root_and_path(&self) -> Option<(i32, &str)> {
        let root = self.import_folder_id?;
        let path = self.file_path.as_deref()?;
        if path.trim().is_empty() {
            return None;
        }
        Some((root, path))
    }

    /// Check the request shape. Identifiers are checked first, then the
    /// presence of hashes, then individual field values.
    pub fn validate(&self) -> Result<&FakeHashes, RegistrarError> {
        if self.file_id.is_none() && self.root_and_path().is_none() {
            return Err(RegistrarError::InputValidation {
                field: None,
                message: "Provide either fileID or importFolderID + filePath.".into(),
            });
        }

        let Some(hashes) = &self.hashes else {
            return Err(RegistrarError::invalid("hashes", "Missing hashes."));
        };

        if let Some(id) = self.file_id
            && id < 1
        {
            return Err(RegistrarError::invalid("fileID", "fileID must be at least 1."));
        }
        if let Some(id) = self.import_folder_id
            && id < 1
        {
            return Err(RegistrarError::invalid(
                "importFolderID",
                "importFolderID must be at least 1.",
            ));
        }
        if self.file_size < 1 {
            return Err(RegistrarError::invalid("fileSize", "fileSize must be at least 1."));
        }

        for kind in HashKind::ALL {
            validate_hash(kind, hashes.get(kind))
                .map_err(|message| RegistrarError::invalid(kind.field(), message))?;
        }

        Ok(hashes)
    }
}

/// IDs of the records a registration ended up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationResult {
    pub file_id: i32,
    pub file_location_id: i32,
}

/// Entry point for fake-hash registrations against one repository.
pub struct Registrar {
    repo: Arc<dyn MediaRepository>,
    locks: IdentityLocks,
    config: RegistrarConfig,
}

impl Registrar {
    pub fn new(repo: Arc<dyn MediaRepository>, config: RegistrarConfig) -> Self {
        Self {
            repo,
            locks: IdentityLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// Validate, reconcile and persist one registration.
    ///
    /// With `serialize_by_identity` on, registrations touching the same file
    /// or the same root+path run one at a time, whichever way the caller
    /// identified the file.
    #[instrument(
        skip(self, registration, ctx),
        fields(
            file_id = ?registration.file_id,
            import_folder_id = ?registration.import_folder_id,
        )
    )]
    pub async fn register(
        &self,
        registration: &Registration,
        ctx: &OperationContext,
    ) -> Result<RegistrationResult, RegistrarError> {
        let hashes = registration.validate()?;
        let repo = self.repo.as_ref();

        let _guards = if self.config.serialize_by_identity {
            self.lock_identities(registration, ctx).await?
        } else {
            Vec::new()
        };

        let now = Utc::now();
        let reconciled = reconcile(repo, registration, now, ctx).await?;
        let result = commit(repo, reconciled, registration, hashes, now, ctx).await?;

        info!(
            file_id = result.file_id,
            file_location_id = result.file_location_id,
            "Registered fake hashes"
        );
        Ok(result)
    }

    /// Hold every identity the registration can touch.
    ///
    /// Keys are read before locking, so a writer that finished in between can
    /// have linked new ones. Those are re-read under the locks and the whole
    /// set is taken again until nothing new shows up.
    async fn lock_identities(
        &self,
        registration: &Registration,
        ctx: &OperationContext,
    ) -> Result<Vec<IdentityGuard<'_>>, RegistrarError> {
        let mut keys = self.identity_keys(registration, ctx).await?;
        loop {
            debug!(?keys, "Acquiring identity locks");
            let guards = self.locks.acquire_all(keys.clone()).await;

            let current = self.identity_keys(registration, ctx).await?;
            let missing: Vec<_> = current.into_iter().filter(|k| !keys.contains(k)).collect();
            if missing.is_empty() {
                return Ok(guards);
            }

            drop(guards);
            keys.extend(missing);
        }
    }

    /// Lock keys for a registration: the file and every location it can be
    /// reconciled with. A root or path that does not resolve adds no key;
    /// reconciliation reports that error afterwards.
    async fn identity_keys(
        &self,
        registration: &Registration,
        ctx: &OperationContext,
    ) -> Result<Vec<IdentityKey>, RegistrarError> {
        let mut keys = Vec::new();

        if let Some(file_id) = registration.file_id {
            keys.push(IdentityKey::File(file_id));
            let locations = ctx.run(self.repo.get_locations_by_file_id(file_id)).await?;
            keys.extend(locations.iter().map(location_key));
        }

        if let Some((root_id, caller_path)) = registration.root_and_path()
            && let Some(root) = ctx.run(self.repo.get_folder_root_by_id(root_id)).await?
            && let Ok(relative) = resolve_relative_path(&root, caller_path)
        {
            let existing = ctx
                .run(self.repo.get_location_by_path_and_root(&relative, root.id))
                .await?;
            if let Some(location) = existing.filter(|l| l.is_linked()) {
                keys.push(IdentityKey::File(location.file_id));
            }
            keys.push(IdentityKey::Location {
                folder_root_id: root.id,
                path: relative.to_lowercase(),
            });
        }

        Ok(keys)
    }
}

fn location_key(location: &LocationRecord) -> IdentityKey {
    IdentityKey::Location {
        folder_root_id: location.folder_root_id,
        path: location.relative_path.to_lowercase(),
    }
}
