use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::Registration;
use super::context::OperationContext;
use super::error::RegistrarError;
use super::path::resolve_relative_path;
use crate::media::{FileRecord, FolderRoot, LocationRecord, file_name_of};
use crate::repository::MediaRepository;

/// Outcome of identity reconciliation, consumed by the upsert step.
#[derive(Clone, Debug)]
pub struct Reconciled {
    /// Existing record, or a new unsaved one (ID 0).
    pub file: FileRecord,
    /// Existing location, or a new unlinked one (ID 0).
    pub location: Option<LocationRecord>,
    /// Root looked up while resolving the caller's path.
    pub folder_root: Option<FolderRoot>,
    /// Root-relative path, when the caller's path was resolved.
    pub relative_path: Option<String>,
}

/// How well an existing location of a file can be trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum LocationRank {
    /// Folder root resolves and the file is present on disk.
    Valid,
    /// Folder root resolves.
    Resolved,
    Unresolved,
}

/// Work out which file and location a registration refers to.
///
/// Nothing is written here.
pub async fn reconcile(
    repo: &dyn MediaRepository,
    registration: &Registration,
    now: DateTime<Utc>,
    ctx: &OperationContext,
) -> Result<Reconciled, RegistrarError> {
    let mut file = None;
    let mut location = None;
    let mut folder_root = None;
    let mut relative_path = None;

    if let Some(file_id) = registration.file_id {
        let found = ctx
            .run(repo.get_file_by_id(file_id))
            .await?
            .ok_or(RegistrarError::UnknownFile(file_id))?;
        location = preferred_location(repo, file_id, ctx).await?;
        file = Some(found);
    }

    if location.is_none() {
        let Some((root_id, caller_path)) = registration.root_and_path() else {
            return Err(RegistrarError::UnresolvableLocation(
                "File location not found. Provide importFolderID + filePath to create it.".into(),
            ));
        };

        let root = ctx
            .run(repo.get_folder_root_by_id(root_id))
            .await?
            .ok_or(RegistrarError::UnknownFolderRoot(root_id))?;
        let relative = resolve_relative_path(&root, caller_path)?;

        let mut found = match ctx
            .run(repo.get_location_by_path_and_root(&relative, root.id))
            .await?
        {
            Some(existing) => existing,
            None => {
                debug!(folder_root_id = root.id, path = %relative, "Creating new file location");
                LocationRecord::new_unlinked(root.id, relative.clone())
            }
        };

        if found.is_linked() {
            if let Some(file_id) = registration.file_id
                && found.file_id != file_id
            {
                return Err(RegistrarError::IdentityConflict {
                    file_id,
                    linked_file_id: found.file_id,
                });
            }

            if file.is_none() {
                match ctx.run(repo.get_file_by_id(found.file_id)).await? {
                    Some(linked) => file = Some(linked),
                    None => {
                        warn!(
                            location_id = found.id,
                            file_id = found.file_id,
                            "File location points at a missing file; relinking"
                        );
                        found.file_id = 0;
                        found.root_type = None;
                    }
                }
            }
        }

        location = Some(found);
        folder_root = Some(root);
        relative_path = Some(relative);
    }

    let file = match file {
        Some(existing) => existing,
        None => FileRecord::new_unsaved(
            relative_path.as_deref().map(file_name_of).unwrap_or_default(),
            registration.date_created.unwrap_or(now),
            registration.date_updated.unwrap_or(now),
            registration.date_imported,
        ),
    };

    Ok(Reconciled {
        file,
        location,
        folder_root,
        relative_path,
    })
}

/// Pick the most trustworthy location of a file: valid, then resolved,
/// then any. Ties go to the lowest location ID.
async fn preferred_location(
    repo: &dyn MediaRepository,
    file_id: i32,
    ctx: &OperationContext,
) -> Result<Option<LocationRecord>, RegistrarError> {
    let locations = ctx.run(repo.get_locations_by_file_id(file_id)).await?;

    let mut best: Option<(LocationRank, LocationRecord)> = None;
    for location in locations {
        let root = ctx
            .run(repo.get_folder_root_by_id(location.folder_root_id))
            .await?;
        let rank = rank_location(root.as_ref(), &location).await;

        let better = match &best {
            None => true,
            Some((best_rank, best_location)) => {
                (rank, location.id) < (*best_rank, best_location.id)
            }
        };
        if better {
            best = Some((rank, location));
        }
    }

    Ok(best.map(|(_, location)| location))
}

pub(crate) async fn rank_location(
    root: Option<&FolderRoot>,
    location: &LocationRecord,
) -> LocationRank {
    let Some(root) = root else {
        return LocationRank::Unresolved;
    };

    let full_path = Path::new(&root.location).join(&location.relative_path);
    match tokio::fs::try_exists(&full_path).await {
        Ok(true) => LocationRank::Valid,
        _ => LocationRank::Resolved,
    }
}
