//! Chart and diagram artifacts for a finished run.
//!
//! Fitness and speciation curves are rendered as SVG; the champion
//! network is emitted as a Graphviz DOT file, to be laid out by an
//! external `dot` invocation.

use crate::experiment::{ExperimentError, GenerationRecord};

use oxineat_nn::genomics::{NNGenome, NodeType};
use plotters::prelude::*;

use std::error::Error;
use std::fs;
use std::path::Path;

fn chart_error(path: &Path, e: impl ToString) -> ExperimentError {
    ExperimentError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Draws the population's best and mean fitness over generations.
pub fn plot_fitness(records: &[GenerationRecord], path: &Path) -> Result<(), ExperimentError> {
    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    let last_generation = records.last().map(|r| r.generation).unwrap_or(0).max(1);
    let y_max = records
        .iter()
        .map(|r| r.best_fitness)
        .fold(1.0f32, f32::max)
        * 1.05;

    (|| -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Population fitness", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..last_generation, 0f32..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc("Fitness")
            .draw()?;
        chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (r.generation, r.best_fitness)),
                &BLUE,
            ))?
            .label("best")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &BLUE));
        chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (r.generation, r.mean_fitness)),
                &RED,
            ))?
            .label("mean")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &RED));
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    })()
    .map_err(|e| chart_error(path, e))
}

/// Draws the number of species present in each generation.
pub fn plot_species(records: &[GenerationRecord], path: &Path) -> Result<(), ExperimentError> {
    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    let last_generation = records.last().map(|r| r.generation).unwrap_or(0).max(1);
    let y_max = records.iter().map(|r| r.species).max().unwrap_or(1) + 1;

    (|| -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Speciation", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..last_generation, 0..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc("Species")
            .draw()?;
        chart.draw_series(LineSeries::new(
            records.iter().map(|r| (r.generation, r.species)),
            &GREEN,
        ))?;
        root.present()?;
        Ok(())
    })()
    .map_err(|e| chart_error(path, e))
}

/// Writes the champion genome as a Graphviz digraph.
///
/// Sensors are labelled `bias`, `A` and `B` in innovation order;
/// suppressed genes are drawn dashed.
pub fn write_champion_dot(genome: &NNGenome, path: &Path) -> Result<(), ExperimentError> {
    let mut dot = String::from("digraph champion {\n    rankdir=LR;\n");
    for node in genome.nodes() {
        let (label, shape) = match node.node_type() {
            NodeType::Sensor => (sensor_label(node.innovation()), "box"),
            NodeType::Neuron => (format!("h{}", node.innovation()), "circle"),
            NodeType::Actuator => ("A xor B".to_string(), "doublecircle"),
        };
        dot.push_str(&format!(
            "    n{} [label=\"{}\", shape={}];\n",
            node.innovation(),
            label,
            shape
        ));
    }
    for gene in genome.genes() {
        let style = if gene.suppressed() { "dashed" } else { "solid" };
        dot.push_str(&format!(
            "    n{} -> n{} [label=\"{:.2}\", style={}];\n",
            gene.input(),
            gene.output(),
            gene.weight(),
            style
        ));
    }
    dot.push_str("}\n");
    fs::write(path, dot).map_err(|e| ExperimentError::Artifact {
        path: path.to_path_buf(),
        source: e,
    })
}

fn sensor_label(innovation: usize) -> String {
    match innovation {
        0 => "bias".to_string(),
        1 => "A".to_string(),
        2 => "B".to_string(),
        other => format!("in{}", other),
    }
}
