//! Deterministic content hash of a directory tree.
//!
//! Used by the configure stage to decide whether the regenerated story
//! configs differ from the previous run's. The hash covers every file's
//! content and its sorted relative path, so it is independent of write
//! order and directory-listing order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Marker hash for a directory that does not exist yet, distinct from
/// every real digest so a first-run configure always signals a change.
const ABSENT: &str = "absent";

/// Hash the contents of `dir`, returning a fixed marker when the
/// directory is missing.
///
/// # Errors
///
/// Returns any I/O error raised while walking or reading files.
pub fn hash_dir(dir: &Path) -> io::Result<String> {
    if !dir.exists() {
        return Ok(ABSENT.to_string());
    }
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files)?;
    files.sort();

    let mut listing = String::new();
    for (relative, path) in &files {
        let digest = Sha256::digest(fs::read(path)?);
        listing.push_str(&hex::encode(digest));
        listing.push_str("  ");
        listing.push_str(relative);
        listing.push('\n');
    }
    Ok(hex::encode(Sha256::digest(listing.as_bytes())))
}

fn collect_files(
    root: &Path,
    dir: &Path,
    files: &mut Vec<(String, PathBuf)>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((relative, path));
        }
    }
    Ok(())
}
