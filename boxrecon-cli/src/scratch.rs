//! Request-scoped staging for report batches
//!
//! A batch's files are copied into a directory that exists only for the
//! duration of one run, under filesystem-safe names. The directory name
//! embeds a fresh UUID, so concurrent runs never share a namespace.
//! Removal happens on drop and is best-effort: failures are swallowed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Staging directory removed (best-effort) when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Create a fresh `boxrecon-<uuid>` directory under the system temp dir.
    pub fn create() -> io::Result<Self> {
        let root = std::env::temp_dir().join(format!("boxrecon-{}", Uuid::new_v4()));
        fs::create_dir_all(&root)?;
        Ok(ScratchDir { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Copy a file in under a sanitized version of `original_name` and
    /// return the staged path.
    pub fn stage(&self, source: &Path, original_name: &str) -> io::Result<PathBuf> {
        let safe_name = sanitize_file_name(original_name);
        if safe_name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("file name sanitizes to nothing: {:?}", original_name),
            ));
        }
        let staged = self.root.join(safe_name);
        fs::copy(source, &staged)?;
        Ok(staged)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.root) {
            log::debug!("leaving scratch dir {} behind: {}", self.root.display(), e);
        }
    }
}

/// Filesystem-safe rendition of a submitted file name: whitespace becomes
/// `_`; everything outside ASCII alphanumerics, `.`, `-` and `_` is
/// dropped, path separators included.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_date_tokens() {
        assert_eq!(
            sanitize_file_name("Cidade Nova 07.08.xlsx"),
            "Cidade_Nova_07.08.xlsx"
        );
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(
            sanitize_file_name("../uploads/Castelo 07.08.xlsx"),
            "..uploadsCastelo_07.08.xlsx"
        );
        assert_eq!(sanitize_file_name("a/b\\c.xlsx"), "abc.xlsx");
    }

    #[test]
    fn test_sanitize_drops_non_ascii() {
        assert_eq!(
            sanitize_file_name("Relatório Raja 07.08.xlsx"),
            "Relatrio_Raja_07.08.xlsx"
        );
    }

    #[test]
    fn test_scratch_dirs_are_unique() {
        let a = ScratchDir::create().unwrap();
        let b = ScratchDir::create().unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_stage_and_cleanup() {
        let source_dir = tempfile::TempDir::new().unwrap();
        let source = source_dir.path().join("input.xlsx");
        fs::write(&source, b"bytes").unwrap();

        let scratch = ScratchDir::create().unwrap();
        let root = scratch.path().to_path_buf();
        let staged = scratch.stage(&source, "Castelo 07.08.xlsx").unwrap();

        assert_eq!(staged, root.join("Castelo_07.08.xlsx"));
        assert_eq!(fs::read(&staged).unwrap(), b"bytes");

        drop(scratch);
        assert!(!root.exists());
    }

    #[test]
    fn test_stage_rejects_fully_sanitized_away_names() {
        let source_dir = tempfile::TempDir::new().unwrap();
        let source = source_dir.path().join("input.xlsx");
        fs::write(&source, b"bytes").unwrap();

        let scratch = ScratchDir::create().unwrap();
        assert!(scratch.stage(&source, "çãé").is_err());
    }
}
