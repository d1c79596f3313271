//! Deduplication of a `<uses-permission>` declaration in a generated manifest.
//!
//! Plugin installs can leave the same permission declared twice in
//! `AndroidManifest.xml`, which fails the Android build. The first
//! declarations are dropped until one is left.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of patching manifest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    pub text: String,
    /// Declarations found before patching.
    pub found: usize,
    pub removed: usize,
}

fn declaration_pattern(permission: &str) -> Regex {
    let pattern = format!(
        r#"(?i)[ \t]*<uses-permission\s+android:name\s*=\s*"{}"\s*/>[ \t]*(\r?\n)?"#,
        regex::escape(permission)
    );
    // The permission is escaped, so the pattern is always valid
    Regex::new(&pattern).unwrap_or_else(|e| unreachable!("invalid declaration pattern: {e}"))
}

/// Remove duplicate declarations of `permission`, keeping the last one.
pub fn dedupe_permission(manifest: &str, permission: &str) -> ManifestPatch {
    let pattern = declaration_pattern(permission);
    let found = pattern.find_iter(manifest).count();

    if found <= 1 {
        return ManifestPatch {
            text: manifest.to_string(),
            found,
            removed: 0,
        };
    }

    let removed = found - 1;
    let text = pattern.replacen(manifest, removed, "").into_owned();
    ManifestPatch {
        text,
        found,
        removed,
    }
}

/// Patch the manifest file in place. The file is always rewritten.
pub fn fix_manifest_file(path: &Path, permission: &str) -> Result<ManifestPatch, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }

    let io_error = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let manifest = fs::read_to_string(path).map_err(io_error)?;
    let patch = dedupe_permission(&manifest, permission);
    fs::write(path, &patch.text).map_err(io_error)?;

    log::info!(
        "{}: {} declaration(s) of {permission}, removed {}",
        path.display(),
        patch.found,
        patch.removed
    );
    Ok(patch)
}
