use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::error::PerceptronError;

pub type Label = u8;

const INITIAL_LOWER_BOUND: f64 = -1.0;
const INITIAL_UPPER_BOUND: f64 = 1.0;

/// A single neuron with a Heaviside step activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    weights: Array1<f64>,
    bias: f64,
}

impl Perceptron {
    /// Creates a perceptron with `number_of_inputs` weights. Weights and bias
    /// start uniformly distributed in [-1, 1].
    pub fn new<R: Rng>(number_of_inputs: usize, rng: &mut R) -> Result<Self, PerceptronError> {
        if number_of_inputs == 0 {
            return Err(PerceptronError::NoInputs);
        }

        let weights = Array1::from_shape_fn(number_of_inputs, |_| {
            rng.gen_range(INITIAL_LOWER_BOUND..=INITIAL_UPPER_BOUND)
        });
        let bias = rng.gen_range(INITIAL_LOWER_BOUND..=INITIAL_UPPER_BOUND);

        Ok(Self { weights, bias })
    }

    pub fn from_parameters(weights: Vec<f64>, bias: f64) -> Result<Self, PerceptronError> {
        if weights.is_empty() {
            return Err(PerceptronError::NoInputs);
        }

        Ok(Self {
            weights: Array1::from(weights),
            bias,
        })
    }

    pub fn number_of_inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn heaviside(sum: f64) -> Label {
        if sum < 0.0 {
            0
        } else {
            1
        }
    }

    fn check_dimension(&self, inputs: &[i32]) -> Result<(), PerceptronError> {
        if inputs.len() == self.weights.len() {
            Ok(())
        } else {
            Err(PerceptronError::DimensionMismatch {
                expected: self.weights.len(),
                got: inputs.len(),
            })
        }
    }

    /// Weighted sum of the inputs plus bias, before the step function.
    pub fn weighted_sum(&self, inputs: &[i32]) -> Result<f64, PerceptronError> {
        self.check_dimension(inputs)?;

        let inputs: Array1<f64> = inputs.iter().map(|&input| f64::from(input)).collect();

        Ok(inputs.dot(&self.weights) + self.bias)
    }

    /// Classifies `inputs`. A sum of exactly zero yields 1.
    pub fn activate(&self, inputs: &[i32]) -> Result<Label, PerceptronError> {
        self.weighted_sum(inputs).map(Self::heaviside)
    }

    /// One step of the perceptron learning rule. `delta` is expected minus
    /// actual, so it is -1, 0 or 1.
    pub fn adjust(
        &mut self,
        inputs: &[i32],
        delta: i32,
        learning_rate: f64,
    ) -> Result<(), PerceptronError> {
        self.check_dimension(inputs)?;

        let step = f64::from(delta) * learning_rate;

        self.weights
            .iter_mut()
            .zip(inputs)
            .for_each(|(weight, &input)| *weight += f64::from(input) * step);
        self.bias += step;

        Ok(())
    }

    /// Slope and intercept of the line where the weighted sum is zero, for a
    /// two-input perceptron: `w0*x + w1*y + bias = 0`. `None` when the line is
    /// vertical (`w1 == 0`) or the model is not two-dimensional.
    pub fn decision_line(&self) -> Option<(f64, f64)> {
        if self.weights.len() != 2 {
            return None;
        }

        let (w0, w1) = (self.weights[0], self.weights[1]);

        #[allow(clippy::float_cmp)]
        if w1 == 0.0 {
            return None;
        }

        Some((-w0 / w1, -self.bias / w1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_initializes_within_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let perceptron = Perceptron::new(5, &mut rng).unwrap();

        assert_eq!(perceptron.number_of_inputs(), 5);
        assert!(perceptron
            .weights()
            .iter()
            .all(|weight| (-1.0..=1.0).contains(weight)));
        assert!((-1.0..=1.0).contains(&perceptron.bias()));
    }

    #[test]
    fn new_rejects_zero_inputs() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(Perceptron::new(0, &mut rng), Err(PerceptronError::NoInputs));
    }

    #[test]
    fn activate_computes_weighted_sum_and_steps() {
        let perceptron = Perceptron::from_parameters(vec![0.5, -1.0], 0.25).unwrap();

        // 0.5*4 - 1*2 + 0.25 = 0.25
        assert_eq!(perceptron.activate(&[4, 2]).unwrap(), 1);
        // 0.5*0 - 1*1 + 0.25 = -0.75
        assert_eq!(perceptron.activate(&[0, 1]).unwrap(), 0);
    }

    #[test]
    fn activate_treats_zero_sum_as_one() {
        let perceptron = Perceptron::from_parameters(vec![1.0, -1.0], 0.0).unwrap();

        assert_relative_eq!(perceptron.weighted_sum(&[3, 3]).unwrap(), 0.0);
        assert_eq!(perceptron.activate(&[3, 3]).unwrap(), 1);
    }

    #[test]
    fn activate_rejects_dimension_mismatch() {
        let perceptron = Perceptron::from_parameters(vec![1.0, 1.0], 0.0).unwrap();

        assert_eq!(
            perceptron.activate(&[1, 2, 3]),
            Err(PerceptronError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
        assert_eq!(
            perceptron.activate(&[1]),
            Err(PerceptronError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn adjust_applies_learning_rule() {
        let mut perceptron = Perceptron::from_parameters(vec![0.1, 0.2], 0.3).unwrap();

        perceptron.adjust(&[10, -20], 1, 0.1).unwrap();

        assert_relative_eq!(perceptron.weights()[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(perceptron.weights()[1], -1.8, epsilon = 1e-12);
        assert_relative_eq!(perceptron.bias(), 0.4, epsilon = 1e-12);

        perceptron.adjust(&[10, -20], -1, 0.1).unwrap();

        assert_relative_eq!(perceptron.weights()[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(perceptron.weights()[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(perceptron.bias(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn adjust_with_zero_delta_is_noop() {
        let mut perceptron = Perceptron::from_parameters(vec![0.1, 0.2], 0.3).unwrap();
        let before = perceptron.clone();

        perceptron.adjust(&[55, -99], 0, 1.0).unwrap();

        assert_eq!(perceptron, before);
    }

    #[test]
    fn adjust_rejects_dimension_mismatch_without_mutating() {
        let mut perceptron = Perceptron::from_parameters(vec![0.1, 0.2], 0.3).unwrap();
        let before = perceptron.clone();

        assert!(perceptron.adjust(&[1], 1, 0.5).is_err());
        assert_eq!(perceptron, before);
    }

    #[test]
    fn decision_line_solves_for_y() {
        let perceptron = Perceptron::from_parameters(vec![-2.0, 1.0], -3.0).unwrap();
        let (slope, intercept) = perceptron.decision_line().unwrap();

        assert_relative_eq!(slope, 2.0);
        assert_relative_eq!(intercept, 3.0);

        let vertical = Perceptron::from_parameters(vec![1.0, 0.0], 0.0).unwrap();
        assert!(vertical.decision_line().is_none());
    }
}
