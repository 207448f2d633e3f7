pub mod analysis;
pub mod classify;
pub mod error;
pub mod media;
pub mod scan;
pub mod table;
pub mod writer;

pub use analysis::Analysis;
pub use error::{Error, Result};
pub use media::{Kind, MediaFile, RegularFile, Timestamps, Variant};
pub use scan::scan_dir;
pub use writer::{assign_names, write_output, CopySummary, Counts};

/// Type alias for progress callback: (stage, current, total, message)
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + Send + Sync + 'a;
