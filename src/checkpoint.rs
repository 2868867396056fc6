//! Periodic population snapshots, written as RON into the output directory.

use crate::experiment::{ExperimentError, XorPopulation};

use std::fs;
use std::path::{Path, PathBuf};

/// Serializes the population to `neat-checkpoint-<generation>.ron`
/// inside `dir`, and returns the written path.
pub fn save(population: &XorPopulation, dir: &Path) -> Result<PathBuf, ExperimentError> {
    let path = dir.join(format!("neat-checkpoint-{}.ron", population.generation()));
    let snapshot =
        ron::to_string(population).map_err(|e| ExperimentError::Checkpoint(e.to_string()))?;
    fs::write(&path, snapshot).map_err(|e| ExperimentError::Artifact {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Restores a population from a snapshot written by [`save`].
pub fn load(path: &Path) -> Result<XorPopulation, ExperimentError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ExperimentError::Checkpoint(format!("{}: {}", path.display(), e)))?;
    ron::from_str(&text).map_err(|e| ExperimentError::Checkpoint(e.to_string()))
}
