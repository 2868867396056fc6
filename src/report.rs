//! Human-readable summary of a finished run.

use crate::experiment::{ExperimentConfig, Outcome, RunReport};

/// Prints the champion genome, its answers to every test case,
/// and the overall SUCCESS/FAILURE determination.
pub fn print_summary(report: &RunReport, config: &ExperimentConfig) {
    println!(
        "\nBest genome after {} generation(s) ({} nodes, {} genes):",
        report.generations,
        report.champion.nodes().count(),
        report.champion.genes().count(),
    );
    println!("{}", report.champion);

    println!("\nOutput:");
    for case in &report.case_results {
        println!(
            "input [{}, {}], expected {}, got {:.6} (error {:.6})",
            case.inputs[0], case.inputs[1], case.expected, case.output, case.error,
        );
    }

    let total_error: f32 = report.case_results.iter().map(|c| c.error).sum();
    println!(
        "\nTotal error: {:.6} ({:.6} per case)",
        total_error,
        total_error / report.case_results.len().max(1) as f32,
    );
    println!(
        "Fitness: {:.6} (threshold {}, population size {})",
        report.champion_fitness, config.fitness_threshold, config.population.size,
    );

    match report.outcome {
        Outcome::Success => println!("\nSUCCESS: the evolved network solves XOR."),
        Outcome::Failure => {
            println!("\nFAILURE: no XOR solver found within the generation limit.")
        }
    }
}
