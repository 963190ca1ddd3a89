pub mod assemble;
pub mod cache;
pub mod constants;
pub mod diagnostics;
pub mod discover;
pub mod layout;
mod options;
pub mod postprocess;
pub mod render;
mod stats;
mod types;

pub use assemble::{AssembleReport, AssembleRequest, ExportOutcome, assemble, build, export};
pub use cache::{CacheStats, ImageCache, ResolveImage, default_cache_dir};
pub use diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics};
pub use discover::discover_images;
pub use options::*;
pub use postprocess::{Ghostscript, PostProcessor};
pub use stats::calculate_statistics;
pub use types::*;
