//! Subcommand handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

pub mod inspect;
pub mod reconcile;

pub use inspect::handle_inspect_command;
pub use reconcile::handle_reconcile_command;

/// Expand the command-line inputs: files stay as given, directories
/// contribute their direct children (sorted, for a stable order).
pub(crate) fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let entries = fs::read_dir(input)
                .with_context(|| format!("Failed to read directory: {}", input.display()))?;
            let mut children: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            children.sort();
            files.extend(children);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("Input does not exist: {}", input.display());
        }
    }
    Ok(files)
}

/// The name a file was submitted under.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
