use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::media::{Kind, MediaFile, Variant};
use crate::ProgressCallback;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub pictures: u32,
    pub videos: u32,
    pub others: u32,
}

impl Counts {
    pub fn total(&self) -> u32 {
        self.pictures + self.videos + self.others
    }
}

/// Result of the copy phase.
#[derive(Debug, Clone)]
pub struct CopySummary {
    pub counts: Counts,
    pub output_dir: PathBuf,
    /// (source, destination) in modification-time order
    pub assignments: Vec<(PathBuf, PathBuf)>,
}

impl fmt::Display for CopySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} pictures, {} videos and {} other files to '{}'",
            self.counts.pictures,
            self.counts.videos,
            self.counts.others,
            self.output_dir.display()
        )
    }
}

/// Sort by modification time and give every regular file an index and a
/// convolution that makes its generated name unique within the run.
///
/// Unusual files keep their own names; those names are reserved up front so a
/// generated name never lands on one of them.
pub fn assign_names(files: &mut [MediaFile]) -> Counts {
    // Stable: equal timestamps keep listing order
    files.sort_by_key(|f| f.times.modified);

    // Raw names: distinct non-UTF-8 names must stay distinct
    let mut used: HashSet<OsString> = files
        .iter()
        .filter(|f| f.is_unusual())
        .map(|f| f.file_name.clone())
        .collect();
    let mut counts = Counts::default();

    for file in files.iter_mut() {
        let modified = file.times.modified;
        match &mut file.kind {
            Kind::Regular(r) => {
                let seen = match r.variant {
                    Variant::Picture => &mut counts.pictures,
                    Variant::Video => &mut counts.videos,
                };
                *seen += 1;
                r.index = *seen;
                r.convolution = 0;
                let mut name = r.generated_name(&modified);
                while used.contains(OsStr::new(&name)) {
                    r.convolution += 1;
                    name = r.generated_name(&modified);
                }
                used.insert(name.into());
            }
            Kind::Unusual => counts.others += 1,
        }
    }

    counts
}

/// Assign output names (sequential), then copy every file into `output_dir` (parallel).
///
/// Stops at the first failed copy. Progress is reported in modification-time
/// order once every copy has finished.
pub fn write_output(
    files: &mut [MediaFile],
    output_dir: &Path,
    progress: &ProgressCallback<'_>,
) -> Result<CopySummary> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    // Phase 1: naming depends on order, keep it single-threaded
    let counts = assign_names(files);
    let assignments: Vec<(PathBuf, PathBuf)> = files
        .iter()
        .map(|f| (f.path.clone(), output_dir.join(f.output_file_name())))
        .collect();

    // Phase 2: copies are independent of each other
    assignments
        .par_iter()
        .map(|(source, dest)| {
            fs::copy(source, dest)
                .map(|_| ())
                .map_err(|e| copy_error(source, dest, e))
        })
        .collect::<Result<Vec<()>>>()?;

    let total = assignments.len() as u64;
    for (current, (source, dest)) in assignments.iter().enumerate() {
        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress(
            "copy",
            current as u64,
            total,
            &format!("Copied {} to '{}'", source_name, dest.display()),
        );
    }

    tracing::info!("wrote {} files to {}", total, output_dir.display());

    Ok(CopySummary {
        counts,
        output_dir: output_dir.to_path_buf(),
        assignments,
    })
}

/// A missing source is reported as such; anything else blames the destination.
fn copy_error(source: &Path, dest: &Path, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound && !source.exists() {
        Error::io(source, err)
    } else {
        Error::Io {
            path: dest.to_path_buf(),
            source: err,
        }
    }
}
