//! External PDF size optimization
//!
//! The full-size PDF is handed to a [`PostProcessor`] that writes a
//! smaller, compatible copy. Failures are reported, never swallowed.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::types::*;

pub trait PostProcessor: Send + Sync {
    /// Short name used in messages
    fn name(&self) -> &str;

    /// Read `input` and write the optimized document to `output`
    fn process(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Ghostscript `pdfwrite` re-encoder
#[derive(Debug, Clone, PartialEq)]
pub struct Ghostscript {
    pub binary: PathBuf,
    /// Value of `-dPDFSETTINGS`
    pub pdf_settings: String,
    /// Value of `-dCompatibilityLevel`
    pub compatibility_level: String,
}

impl Default for Ghostscript {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("gs"),
            pdf_settings: "/printer".to_string(),
            compatibility_level: "1.4".to_string(),
        }
    }
}

impl Ghostscript {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Default::default()
        }
    }

    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-sDEVICE=pdfwrite")
            .arg(format!("-dCompatibilityLevel={}", self.compatibility_level))
            .arg(format!("-dPDFSETTINGS={}", self.pdf_settings))
            .args(["-dNOPAUSE", "-dQUIET", "-dBATCH"])
            .arg(format!("-sOutputFile={}", output.display()))
            .arg(input);
        cmd
    }
}

impl PostProcessor for Ghostscript {
    fn name(&self) -> &str {
        "ghostscript"
    }

    fn process(&self, input: &Path, output: &Path) -> Result<()> {
        let fallback = input.to_owned();
        let result = self.command(input, output).output().map_err(|e| {
            BookletError::PostProcess {
                fallback: fallback.clone(),
                reason: format!("could not run {}: {}", self.binary.display(), e),
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(BookletError::PostProcess {
                fallback,
                reason: format!("{} exited with {}: {}", self.name(), result.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghostscript_arguments() {
        let gs = Ghostscript::default();
        let cmd = gs.command(Path::new("out.pdf.large"), Path::new("out.pdf"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(cmd.get_program(), "gs");
        assert!(args.contains(&"-sDEVICE=pdfwrite".to_string()));
        assert!(args.contains(&"-dPDFSETTINGS=/printer".to_string()));
        assert!(args.contains(&"-dCompatibilityLevel=1.4".to_string()));
        assert!(args.contains(&"-sOutputFile=out.pdf".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("out.pdf.large"));
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let gs = Ghostscript::with_binary("/nonexistent/definitely-not-gs");
        let result = gs.process(Path::new("in.pdf"), Path::new("out.pdf"));
        match result {
            Err(BookletError::PostProcess { fallback, reason }) => {
                assert_eq!(fallback, PathBuf::from("in.pdf"));
                assert!(reason.contains("could not run"));
            }
            other => panic!("Expected PostProcess error, got {:?}", other),
        }
    }
}
