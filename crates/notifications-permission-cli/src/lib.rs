pub mod manifest;

pub use manifest::{ManifestError, ManifestPatch, dedupe_permission, fix_manifest_file};
