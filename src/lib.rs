//! Configures and drives a NEAT run that evolves a small feed-forward
//! network solving the XOR function, then reports the outcome and renders
//! charts of the run.
//!
//! All of the evolutionary algorithm (genome representation, mutation,
//! crossover, speciation, stagnation) lives in the
//! [`oxineat`](https://crates.io/crates/oxineat) and
//! [`oxineat-nn`](https://crates.io/crates/oxineat-nn) crates. This crate
//! owns only the fitness function over the four XOR cases, the run loop
//! around the engine, and the reporting/visualization of results.
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//! use xor_evolve::dataset::TrainingSet;
//! use xor_evolve::experiment::{self, ExperimentConfig};
//!
//! let config = ExperimentConfig::from_path(Path::new("xor.ron")).unwrap();
//! let training = TrainingSet::xor();
//! let report = experiment::run(&config, &training, Path::new("out")).unwrap();
//! println!("champion fitness: {}", report.champion_fitness);
//! ```

pub mod checkpoint;
pub mod dataset;
pub mod experiment;
pub mod fitness;
pub mod output;
pub mod report;
pub mod viz;

pub use experiment::{ExperimentConfig, ExperimentError, Outcome, RunReport};
