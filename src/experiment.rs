//! Experiment configuration and the evolutionary run loop.

use crate::checkpoint;
use crate::dataset::TrainingSet;
use crate::fitness::{self, Predictor};

use oxineat::logging::{EvolutionLogger, Log, ReportingLevel};
use oxineat::{Population, PopulationConfig};
use oxineat_nn::genomics::{GeneticConfig, History, NNGenome};
use oxineat_nn::networks::FunctionApproximatorNetwork;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// The population type evolved by this experiment.
pub type XorPopulation = Population<GeneticConfig, History, NNGenome>;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("population degenerated: {0}")]
    Degenerate(String),
    #[error("checkpoint error: {0}")]
    Checkpoint(String),
    #[error("failed to create output directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render chart {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },
}

/// Hyper-parameters for a single run, loaded once and never mutated.
///
/// The `genetic` and `population` sections are passed through verbatim
/// to the evolutionary engine; the remaining fields belong to the driver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub genetic: GeneticConfig,
    pub population: PopulationConfig,
    /// A champion whose fitness exceeds this value classifies
    /// the run as a success.
    pub fitness_threshold: f32,
    /// Upper bound on the number of evaluated generations.
    #[serde(default = "default_generation_limit")]
    pub generation_limit: usize,
    /// Snapshot the population every this many generations.
    #[serde(default)]
    pub checkpoint_interval: Option<NonZeroUsize>,
}

fn default_generation_limit() -> usize {
    300
}

impl ExperimentConfig {
    /// Loads a configuration from a RON file.
    pub fn from_path(path: &Path) -> Result<ExperimentConfig, ExperimentError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ExperimentError::Config(format!("{}: {}", path.display(), e)))?;
        ron::from_str(&text)
            .map_err(|e| ExperimentError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Checks that the configured genome shape matches the training set.
    /// Networks take one extra input, the bias, ahead of the case inputs.
    fn validate_for(&self, training: &TrainingSet) -> Result<(), ExperimentError> {
        let wanted_inputs = training.input_arity() + 1;
        if self.genetic.input_count.get() != wanted_inputs || self.genetic.output_count.get() != 1 {
            return Err(ExperimentError::Config(format!(
                "genome shape must be {} inputs (bias + {}) and 1 output, configuration declares {} and {}",
                wanted_inputs,
                training.input_arity(),
                self.genetic.input_count,
                self.genetic.output_count,
            )));
        }
        Ok(())
    }
}

/// How the run turned out, judged against the configured fitness threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// The champion's answer to a single test case.
#[derive(Clone, Copy, Debug)]
pub struct CaseResult {
    pub inputs: [f32; 2],
    pub expected: f32,
    pub output: f32,
    pub error: f32,
}

/// Per-generation population statistics, kept for charting.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub species: usize,
}

impl GenerationRecord {
    fn from_log(log: &Log<NNGenome>) -> GenerationRecord {
        let fitness = log
            .genome_stats
            .iter()
            .find(|(name, _)| name == "fitness")
            .map(|(_, stats)| stats.clone());
        GenerationRecord {
            generation: log.generation_number,
            best_fitness: fitness.as_ref().map(|s| s.maximum).unwrap_or(0.0),
            mean_fitness: fitness.map(|s| s.mean).unwrap_or(0.0),
            species: log.species_count,
        }
    }
}

/// Everything worth reporting about a finished run.
pub struct RunReport {
    pub champion: NNGenome,
    /// Number of generations that were evaluated.
    pub generations: usize,
    /// The champion's fitness, re-evaluated after the run.
    pub champion_fitness: f32,
    pub outcome: Outcome,
    pub case_results: Vec<CaseResult>,
    pub history: Vec<GenerationRecord>,
}

/// Runs the experiment to completion.
///
/// Every generation, each genome in the population is turned into a
/// fresh network and scored against `training` exactly once; the engine
/// owns selection, speciation and reproduction. The loop stops as soon
/// as the champion's fitness exceeds the configured threshold, or after
/// `generation_limit` evaluated generations, whichever comes first.
///
/// The best genome observed across all generations is then re-evaluated
/// case by case and the run is classified as [`Outcome::Success`] or
/// [`Outcome::Failure`]. A failed
/// run is still an `Ok` result; errors are reserved for configuration
/// problems, a degenerate population, and checkpoint I/O.
pub fn run(
    config: &ExperimentConfig,
    training: &TrainingSet,
    out_dir: &Path,
) -> Result<RunReport, ExperimentError> {
    config.validate_for(training)?;

    let mut population: XorPopulation =
        Population::new(config.population.clone(), config.genetic.clone());
    let mut logger: EvolutionLogger<NNGenome> = EvolutionLogger::new(ReportingLevel::NoGenomes);
    let mut best_ever: Option<NNGenome> = None;

    for generation in 0..config.generation_limit {
        if generation > 0 {
            population
                .evolve()
                .map_err(|e| ExperimentError::Degenerate(e.to_string()))?;
        }

        population.evaluate_fitness(|genome| {
            let mut network = FunctionApproximatorNetwork::from::<1>(genome);
            fitness::score(&mut network, training)
        });
        logger.log(
            &population,
            &|g| [g.fitness(), g.nodes().count() as f32, g.genes().count() as f32],
            ["fitness", "nodes", "genes"],
        );

        let best = population.champion().fitness();
        if best_ever.as_ref().map_or(true, |g| best > g.fitness()) {
            best_ever = Some(population.champion().clone());
        }
        tracing::info!(
            generation = population.generation(),
            best = best as f64,
            species = population.species().count(),
            "generation evaluated"
        );

        if let Some(interval) = config.checkpoint_interval {
            // The freshly seeded generation 0 is not worth snapshotting.
            if population.generation() > 0 && population.generation() % interval.get() == 0 {
                let path = checkpoint::save(&population, out_dir)?;
                tracing::debug!(path = %path.display(), "checkpoint written");
            }
        }

        if best > config.fitness_threshold {
            tracing::info!(
                generation = population.generation(),
                best = best as f64,
                "fitness threshold reached"
            );
            break;
        }
    }

    let champion = best_ever.unwrap_or_else(|| population.champion().clone());
    let mut network = FunctionApproximatorNetwork::from::<1>(&champion);
    let case_results: Vec<CaseResult> = training
        .iter()
        .map(|case| {
            let output = network.predict(case.inputs);
            CaseResult {
                inputs: case.inputs,
                expected: case.expected,
                output,
                error: (output - case.expected).abs(),
            }
        })
        .collect();
    let champion_fitness = fitness::score(&mut network, training);
    let outcome = if champion_fitness > config.fitness_threshold {
        Outcome::Success
    } else {
        Outcome::Failure
    };
    let history: Vec<GenerationRecord> = logger.iter().map(GenerationRecord::from_log).collect();

    Ok(RunReport {
        champion,
        generations: history.len(),
        champion_fitness,
        outcome,
        case_results,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::num::NonZeroUsize;

    fn tiny_config() -> ExperimentConfig {
        ExperimentConfig {
            genetic: GeneticConfig {
                input_count: NonZeroUsize::new(3).unwrap(),
                output_count: NonZeroUsize::new(1).unwrap(),
                activation_types: vec![oxineat_nn::genomics::ActivationType::Sigmoid],
                output_activation_types: vec![oxineat_nn::genomics::ActivationType::Sigmoid],
                child_mutation_chance: 0.65,
                mate_by_averaging_chance: 0.4,
                suppression_reset_chance: 1.0,
                initial_expression_chance: 1.0,
                weight_bound: 5.0,
                weight_reset_chance: 0.2,
                weight_nudge_chance: 0.9,
                weight_mutation_power: 2.5,
                node_addition_mutation_chance: 0.03,
                gene_addition_mutation_chance: 0.05,
                max_gene_addition_mutation_attempts: 20,
                recursion_chance: 0.0,
                excess_gene_factor: 1.0,
                disjoint_gene_factor: 1.0,
                common_weight_factor: 0.4,
                ..GeneticConfig::zero()
            },
            population: PopulationConfig {
                size: NonZeroUsize::new(20).unwrap(),
                distance_threshold: 3.0,
                elitism: 1,
                survival_threshold: 0.2,
                adoption_rate: 1.0,
                sexual_reproduction_chance: 0.6,
                interspecies_mating_chance: 0.001,
                stagnation_threshold: NonZeroUsize::new(15).unwrap(),
                stagnation_penalty: 1.0,
            },
            fitness_threshold: 20.0,
            generation_limit: 3,
            checkpoint_interval: None,
        }
    }

    #[test]
    fn every_genome_scored_once_per_generation() {
        let config = tiny_config();
        let training = TrainingSet::xor();
        let mut population: XorPopulation =
            Population::new(config.population.clone(), config.genetic.clone());

        let mut calls = 0;
        population.evaluate_fitness(|genome| {
            calls += 1;
            let mut network = FunctionApproximatorNetwork::from::<1>(genome);
            fitness::score(&mut network, &training)
        });

        assert_eq!(calls, config.population.size.get());
        // Sigmoid outputs are strictly inside (0, 1), so every
        // assigned score lands strictly inside (0, 16).
        for genome in population.genomes() {
            assert!(genome.fitness() > 0.0);
            assert!(genome.fitness() < 16.0);
        }
    }

    #[test]
    fn run_respects_generation_cap() {
        // Threshold above the attainable maximum: the cap must govern.
        let config = tiny_config();
        let training = TrainingSet::xor();
        let out_dir = tempfile::tempdir().unwrap();

        let report = run(&config, &training, out_dir.path()).unwrap();

        assert_eq!(report.generations, config.generation_limit);
        assert_eq!(report.outcome, Outcome::Failure);
        assert_eq!(report.case_results.len(), training.len());
        assert_eq!(report.history.len(), config.generation_limit);
        assert!(report.champion_fitness > 0.0 && report.champion_fitness < 16.0);
        for record in &report.history {
            assert!(record.best_fitness >= record.mean_fitness);
            assert!(record.species >= 1);
        }
    }

    #[test]
    fn run_stops_when_threshold_is_reached() {
        // Any sigmoid network clears a threshold of 0, so the run
        // must stop after the very first evaluated generation.
        let mut config = tiny_config();
        config.fitness_threshold = 0.0;
        let training = TrainingSet::xor();
        let out_dir = tempfile::tempdir().unwrap();

        let report = run(&config, &training, out_dir.path()).unwrap();

        assert_eq!(report.generations, 1);
        assert_eq!(report.outcome, Outcome::Success);
    }

    #[test]
    fn run_writes_periodic_checkpoints() {
        let mut config = tiny_config();
        config.checkpoint_interval = NonZeroUsize::new(1);
        let training = TrainingSet::xor();
        let out_dir = tempfile::tempdir().unwrap();

        run(&config, &training, out_dir.path()).unwrap();

        // Three evaluated generations: the seed generation is skipped,
        // generations 1 and 2 each leave a snapshot.
        assert!(!out_dir.path().join("neat-checkpoint-0.ron").exists());
        assert!(out_dir.path().join("neat-checkpoint-1.ron").exists());
        assert!(out_dir.path().join("neat-checkpoint-2.ron").exists());

        let restored = checkpoint::load(&out_dir.path().join("neat-checkpoint-2.ron")).unwrap();
        assert_eq!(restored.generation(), 2);
        assert_eq!(restored.genomes().count(), config.population.size.get());
    }

    #[test]
    fn mismatched_genome_shape_is_rejected() {
        let mut config = tiny_config();
        config.genetic.input_count = NonZeroUsize::new(2).unwrap();
        let training = TrainingSet::xor();
        let out_dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            run(&config, &training, out_dir.path()),
            Err(ExperimentError::Config(_))
        ));
    }

    #[test]
    fn missing_configuration_file_is_an_error() {
        let result = ExperimentConfig::from_path(Path::new("no-such-config.ron"));
        assert!(matches!(result, Err(ExperimentError::Config(_))));
    }

    #[test]
    fn bundled_configuration_parses() {
        let config: ExperimentConfig = ron::from_str(include_str!("../xor.ron")).unwrap();
        assert_eq!(config.generation_limit, 300);
        assert_eq!(config.population.size.get(), 150);
        assert_eq!(config.genetic.input_count.get(), 3);
        assert!(config.fitness_threshold > 0.0);
        config.validate_for(&TrainingSet::xor()).unwrap();
    }
}
