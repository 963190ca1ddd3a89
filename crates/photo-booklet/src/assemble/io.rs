//! Document output

use log::Level;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::LARGE_SUFFIX;
use crate::diagnostics::Diagnostics;
use crate::postprocess::PostProcessor;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Where the final document was written
    pub path: PathBuf,
    /// Whether the post-processor produced it
    pub optimized: bool,
}

/// `<output>.large`, the full-size artifact written before optimization
pub fn large_artifact_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(LARGE_SUFFIX);
    PathBuf::from(name)
}

/// Write the PDF bytes to `output`.
///
/// Without a post-processor the bytes go straight to `output`. With one,
/// they are written to `<output>.large`, the post-processor produces
/// `output`, and the large artifact is removed. If post-processing fails,
/// the large artifact stays in place and the error names it.
pub fn export(
    bytes: &[u8],
    output: &Path,
    post_processor: Option<&dyn PostProcessor>,
    diagnostics: &dyn Diagnostics,
) -> Result<ExportOutcome> {
    let Some(post_processor) = post_processor else {
        diagnostics.report(Level::Info, &format!("Exporting to {}", output.display()));
        fs::write(output, bytes)?;
        return Ok(ExportOutcome {
            path: output.to_owned(),
            optimized: false,
        });
    };

    let large = large_artifact_path(output);
    diagnostics.report(Level::Info, &format!("Exporting to {}", large.display()));
    fs::write(&large, bytes)?;

    diagnostics.report(
        Level::Info,
        &format!("Minimizing to {} with {}", output.display(), post_processor.name()),
    );
    if let Err(err) = post_processor.process(&large, output) {
        diagnostics.report(Level::Error, &err.to_string());
        return Err(match err {
            BookletError::PostProcess { reason, .. } => BookletError::PostProcess {
                fallback: large,
                reason,
            },
            other => BookletError::PostProcess {
                fallback: large,
                reason: other.to_string(),
            },
        });
    }

    fs::remove_file(&large)?;
    Ok(ExportOutcome {
        path: output.to_owned(),
        optimized: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_artifact_path_appends_suffix() {
        assert_eq!(
            large_artifact_path(Path::new("out/booklet.pdf")),
            PathBuf::from("out/booklet.pdf.large")
        );
    }
}
