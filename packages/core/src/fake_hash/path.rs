use std::path::{Component, Path, PathBuf};

use path_absolutize::Absolutize;

use super::error::RegistrarError;
use crate::media::FolderRoot;

/// Resolve a caller-supplied path to a path relative to `root`.
///
/// Absolute paths are taken as-is, relative ones are joined under the root.
/// Both sides are normalized lexically (`.`/`..`, `\` to `/`) without
/// touching the filesystem, then compared component-wise ignoring case.
/// The result always uses `/` as separator.
pub fn resolve_relative_path(root: &FolderRoot, caller_path: &str) -> Result<String, RegistrarError> {
    let root_path = normalize(&root.location)?;

    let caller = caller_path.replace('\\', "/");
    let full_path = if Path::new(&caller).is_absolute() {
        normalize(&caller)?
    } else {
        normalize(&root_path.join(&caller).to_string_lossy())?
    };

    let relative = strip_root(&root_path, &full_path).ok_or_else(|| RegistrarError::PathEscape {
        path: caller_path.to_string(),
    })?;

    if relative.trim().is_empty() {
        return Err(RegistrarError::EmptyRelativePath);
    }

    Ok(relative)
}

fn normalize(path: &str) -> Result<PathBuf, RegistrarError> {
    let unified = path.replace('\\', "/");
    Path::new(&unified)
        .absolutize()
        .map(|p| p.into_owned())
        .map_err(|e| RegistrarError::invalid("filePath", format!("Unable to normalize path: {e}")))
}

fn strip_root(root: &Path, full: &Path) -> Option<String> {
    let mut rest = full.components();
    for expected in root.components() {
        let actual = rest.next()?;
        if !same_component(expected, actual) {
            return None;
        }
    }

    let segments: Vec<String> = rest
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

fn same_component(a: Component<'_>, b: Component<'_>) -> bool {
    a.as_os_str().to_string_lossy().to_lowercase() == b.as_os_str().to_string_lossy().to_lowercase()
}
