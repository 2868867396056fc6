//! Fitness evaluation of candidate networks on a [`TrainingSet`].

use crate::dataset::TrainingSet;

use oxineat_nn::networks::FunctionApproximatorNetwork;

/// The capability an evaluable network must provide:
/// answering a single test case.
pub trait Predictor {
    /// Returns the network's single output for the given case inputs.
    fn predict(&mut self, inputs: [f32; 2]) -> f32;
}

/// Networks generated from genomes take an explicit bias input,
/// fixed at 1.0, ahead of the case inputs.
impl Predictor for FunctionApproximatorNetwork {
    fn predict(&mut self, inputs: [f32; 2]) -> f32 {
        self.evaluate_at(&[1.0, inputs[0], inputs[1]])[0]
    }
}

/// Scores a network against the full training set.
///
/// The per-case absolute errors are summed and the fitness is
/// `(n - error_sum)²`, where `n` is the case count. For the XOR
/// set this ranges over [0, 16], with 16.0 attainable only by a
/// network that answers every case exactly. Squaring amplifies
/// the fitness landscape near the optimum relative to linear error.
///
/// Deterministic for a deterministic network, and free of side
/// effects on anything but the network's own activation state.
pub fn score(net: &mut impl Predictor, cases: &TrainingSet) -> f32 {
    let error_sum: f32 = cases
        .iter()
        .map(|case| (net.predict(case.inputs) - case.expected).abs())
        .sum();
    (cases.len() as f32 - error_sum).powf(2.0)
}
