//! The fixed dataset an experiment scores candidate networks against.

/// A single input/expected-output pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Case {
    pub inputs: [f32; 2],
    pub expected: f32,
}

/// An immutable collection of test cases, built once at startup
/// and passed explicitly to whatever needs it.
#[derive(Clone, Debug)]
pub struct TrainingSet {
    cases: Vec<Case>,
}

impl TrainingSet {
    /// The XOR truth table.
    pub fn xor() -> TrainingSet {
        TrainingSet {
            cases: vec![
                Case {
                    inputs: [0.0, 0.0],
                    expected: 0.0,
                },
                Case {
                    inputs: [0.0, 1.0],
                    expected: 1.0,
                },
                Case {
                    inputs: [1.0, 0.0],
                    expected: 1.0,
                },
                Case {
                    inputs: [1.0, 1.0],
                    expected: 0.0,
                },
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Number of values in each case's input vector.
    pub fn input_arity(&self) -> usize {
        2
    }
}
