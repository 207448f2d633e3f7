use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::media::{Kind, MediaFile};

/// List the regular files directly inside `dir`, in the order the OS returns them.
/// Subdirectories are not entered.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(dir).map_err(|e| Error::io(dir, e))?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        // Follows symlinks, so links to files are kept
        if path.is_dir() {
            tracing::debug!("skipping subdirectory {}", path.display());
            continue;
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Build one classified record per file in `dir`.
pub fn scan_dir(dir: &Path) -> Result<Vec<MediaFile>> {
    let paths = list_files(dir)?;
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = MediaFile::open(&path)?;
        match &file.kind {
            Kind::Regular(r) => tracing::debug!(
                "{} -> {:?} #{} (convolution {})",
                file.filename,
                r.variant,
                r.index,
                r.convolution
            ),
            Kind::Unusual => tracing::debug!("{} -> unusual", file.filename),
        }
        files.push(file);
    }
    tracing::info!("found {} files in {}", files.len(), dir.display());
    Ok(files)
}
