use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::context::OperationContext;
use super::error::RegistrarError;
use super::reconcile::Reconciled;
use super::{FakeHashes, Registration, RegistrationResult};
use crate::media::{FileRecord, FolderRoot, HashKind, NameHashEntry, file_name_of, normalize_hash};
use crate::repository::MediaRepository;

/// Persist a reconciled registration.
///
/// Everything that can fail without touching storage is checked before the
/// first write.
pub async fn commit(
    repo: &dyn MediaRepository,
    reconciled: Reconciled,
    registration: &Registration,
    hashes: &FakeHashes,
    now: DateTime<Utc>,
    ctx: &OperationContext,
) -> Result<RegistrationResult, RegistrarError> {
    let Reconciled {
        mut file,
        location,
        folder_root,
        relative_path,
    } = reconciled;

    let Some(mut location) = location else {
        return Err(RegistrarError::UnresolvableLocation(
            "Unable to resolve or create a file location.".into(),
        ));
    };

    let link_root = if location.is_linked() {
        None
    } else {
        Some(link_root_for(repo, folder_root, location.folder_root_id, ctx).await?)
    };

    apply_registration(&mut file, registration, hashes, relative_path.as_deref(), now);
    let file = ctx.run(repo.save_file_record(file, true)).await?;

    if let Some(root) = link_root {
        debug!(location_id = location.id, file_id = file.id, "Linking file location");
        location.file_id = file.id;
        location.root_type = Some(root.root_type);
    }
    let location = ctx.run(repo.save_location_record(location)).await?;

    refresh_name_hash(
        repo,
        location.file_name(),
        &file,
        registration.date_updated.unwrap_or(now),
        ctx,
    )
    .await?;

    Ok(RegistrationResult {
        file_id: file.id,
        file_location_id: location.id,
    })
}

async fn link_root_for(
    repo: &dyn MediaRepository,
    known: Option<FolderRoot>,
    folder_root_id: i32,
    ctx: &OperationContext,
) -> Result<FolderRoot, RegistrarError> {
    if let Some(root) = known
        && root.id == folder_root_id
    {
        return Ok(root);
    }

    ctx.run(repo.get_folder_root_by_id(folder_root_id))
        .await?
        .ok_or(RegistrarError::UnknownFolderRoot(folder_root_id))
}

/// Copy the caller's values onto the record. Timestamps the caller left out
/// are kept, except the update time which defaults to `now`.
fn apply_registration(
    file: &mut FileRecord,
    registration: &Registration,
    hashes: &FakeHashes,
    relative_path: Option<&str>,
    now: DateTime<Utc>,
) {
    file.ed2k = normalize_hash(hashes.get(HashKind::Ed2k));
    file.crc32 = normalize_hash(hashes.get(HashKind::Crc32));
    file.md5 = normalize_hash(hashes.get(HashKind::Md5));
    file.sha1 = normalize_hash(hashes.get(HashKind::Sha1));
    file.hash_source = registration.hash_source;
    file.file_size = registration.file_size;
    file.updated_at = registration.date_updated.unwrap_or(now);

    if let Some(created) = registration.date_created {
        file.created_at = created;
    }
    if let Some(imported) = registration.date_imported {
        file.imported_at = Some(imported);
    }

    if let Some(path) = relative_path
        && !path.trim().is_empty()
    {
        file.file_name = file_name_of(path).to_string();
    }
}

/// Keep exactly one (name, size) -> ED2K cache entry for the saved file.
///
/// The name is taken from the location's path, which can differ from the
/// file's stored display name when no path came with the request.
async fn refresh_name_hash(
    repo: &dyn MediaRepository,
    file_name: &str,
    file: &FileRecord,
    updated_at: DateTime<Utc>,
    ctx: &OperationContext,
) -> Result<(), RegistrarError> {
    if file_name.trim().is_empty() || file.ed2k.is_empty() {
        return Ok(());
    }

    let mut entries = ctx
        .run(repo.get_name_hash_entries(file_name, file.file_size))
        .await?;

    let entry = match entries.len() {
        0 => NameHashEntry::new_unsaved(file_name, file.file_size, "", updated_at),
        1 => entries.remove(0),
        n => {
            warn!(
                file_name,
                file_size = file.file_size,
                count = n,
                "Collapsing duplicate file name hash entries"
            );
            ctx.run(repo.delete_name_hash_entries(&entries)).await?;
            NameHashEntry::new_unsaved(file_name, file.file_size, "", updated_at)
        }
    };

    let entry = NameHashEntry {
        hash: file.ed2k.clone(),
        updated_at,
        ..entry
    };
    ctx.run(repo.save_name_hash_entry(entry)).await?;
    Ok(())
}
