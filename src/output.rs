//! Output directory handling.

use crate::experiment::ExperimentError;

use std::fs;
use std::path::Path;

/// Clears and recreates the directory that receives charts and
/// checkpoints. Leftovers from a previous run that cannot be removed
/// are tolerated; failure to create the directory is fatal, since no
/// artifact could be written.
pub fn prepare(dir: &Path) -> Result<(), ExperimentError> {
    let _ = fs::remove_dir_all(dir);
    fs::create_dir_all(dir).map_err(|e| ExperimentError::OutputDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_previous_run_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("out");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.svg"), "old").unwrap();

        prepare(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("fresh").join("out");

        prepare(&dir).unwrap();

        assert!(dir.is_dir());
    }
}
