use std::ffi::OsString;
use std::fmt;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::classify;
use crate::error::{Error, Result};

/// Point-in-time snapshot of a file's timestamps, in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub accessed: NaiveDateTime,
    pub modified: NaiveDateTime,
    /// Inode change time on Unix, creation time elsewhere
    pub changed: NaiveDateTime,
}

impl Timestamps {
    pub fn from_metadata(meta: &Metadata) -> io::Result<Self> {
        let modified = meta.modified()?;
        let accessed = meta.accessed().unwrap_or(modified);
        let modified = to_local(modified);
        Ok(Self {
            accessed: to_local(accessed),
            modified,
            changed: changed_time(meta).unwrap_or(modified),
        })
    }

    /// All three timestamps set to the same instant.
    pub fn uniform(at: NaiveDateTime) -> Self {
        Self {
            accessed: at,
            modified: at,
            changed: at,
        }
    }
}

fn to_local(t: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(t).naive_local()
}

#[cfg(unix)]
fn changed_time(meta: &Metadata) -> Option<NaiveDateTime> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(meta.ctime_nsec()).ok()?;
    DateTime::from_timestamp(meta.ctime(), nanos).map(|utc| utc.with_timezone(&Local).naive_local())
}

#[cfg(not(unix))]
fn changed_time(meta: &Metadata) -> Option<NaiveDateTime> {
    meta.created().ok().map(to_local)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Picture,
    Video,
}

impl Variant {
    /// Prefix of generated names, independent of the prefix found on disk.
    pub fn head(self) -> &'static str {
        match self {
            Variant::Picture => "IMG",
            Variant::Video => "VID",
        }
    }

    /// Target extension, independent of the source file's extension.
    pub fn extension(self) -> &'static str {
        match self {
            Variant::Picture => "jpg",
            Variant::Video => "mp4",
        }
    }
}

/// A file recognized as camera output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularFile {
    pub variant: Variant,
    /// 1-based position among files of the same variant, 0 until assigned
    pub index: u32,
    /// Disambiguation counter, 0 means no suffix
    pub convolution: u32,
}

impl RegularFile {
    pub fn new(variant: Variant, index: u32, convolution: u32) -> Self {
        Self {
            variant,
            index,
            convolution,
        }
    }

    /// `IMG_20230105_143000.jpg`, or `IMG_20230105_143000_2.jpg` with a convolution.
    ///
    /// Only the head, the modification time (to the second) and the convolution
    /// take part; `index` does not.
    pub fn generated_name(&self, modified: &NaiveDateTime) -> String {
        let stamp = modified.format("%Y%m%d_%H%M%S");
        if self.convolution == 0 {
            format!("{}_{}.{}", self.variant.head(), stamp, self.variant.extension())
        } else {
            format!(
                "{}_{}_{}.{}",
                self.variant.head(),
                stamp,
                self.convolution,
                self.variant.extension()
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Name does not match the camera grammar; copied under its own name
    Unusual,
    Regular(RegularFile),
}

#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    /// Basename exactly as read from disk
    pub file_name: OsString,
    /// Lossy UTF-8 form of `file_name`, for matching and display
    pub filename: String,
    pub times: Timestamps,
    pub kind: Kind,
}

impl MediaFile {
    /// Build a record from an already captured timestamp snapshot.
    pub fn new(path: impl Into<PathBuf>, times: Timestamps) -> Self {
        let path = path.into();
        let file_name = path.file_name().map(OsString::from).unwrap_or_default();
        let filename = file_name.to_string_lossy().into_owned();
        let kind = classify::classify(&filename);
        Self {
            path,
            file_name,
            filename,
            times,
            kind,
        }
    }

    /// Stat `path` and classify its basename.
    pub fn open(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let times = Timestamps::from_metadata(&meta).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(path, times))
    }

    pub fn regular(&self) -> Option<&RegularFile> {
        match &self.kind {
            Kind::Regular(r) => Some(r),
            Kind::Unusual => None,
        }
    }

    pub fn regular_mut(&mut self) -> Option<&mut RegularFile> {
        match &mut self.kind {
            Kind::Regular(r) => Some(r),
            Kind::Unusual => None,
        }
    }

    pub fn is_unusual(&self) -> bool {
        matches!(self.kind, Kind::Unusual)
    }

    /// Destination name of the copy. Unusual files keep their raw on-disk name.
    pub fn output_file_name(&self) -> OsString {
        match &self.kind {
            Kind::Regular(r) => r.generated_name(&self.times.modified).into(),
            Kind::Unusual => self.file_name.clone(),
        }
    }

    /// Name shown in reports.
    pub fn output_name(&self) -> String {
        match &self.kind {
            Kind::Regular(r) => r.generated_name(&self.times.modified),
            Kind::Unusual => self.filename.clone(),
        }
    }
}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output_name())
    }
}
