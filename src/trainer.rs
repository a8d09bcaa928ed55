use std::ops::RangeInclusive;

use nalgebra::Point2;
use rand::Rng;

use crate::{
    boundary::Boundary,
    error::PerceptronError,
    perceptron::{Label, Perceptron},
};

pub const COORDINATE_RANGE: RangeInclusive<i32> = -100..=100;

pub const VERIFICATION_SAMPLES: usize = 100;

pub const INPUT_DIMENSIONS: usize = 2;

/// Receives every classification the trainer makes. Used for rendering; nothing
/// an observer does is fed back into training.
pub trait ClassificationObserver {
    fn on_boundary(&mut self, _boundary: &Boundary) {}

    fn on_classification(&mut self, _point: &Point2<i32>, _predicted: Label, _expected: Label) {}
}

pub struct NoopObserver;

impl ClassificationObserver for NoopObserver {}

pub fn sample_point<R: Rng>(rng: &mut R) -> Point2<i32> {
    Point2::new(rng.gen_range(COORDINATE_RANGE), rng.gen_range(COORDINATE_RANGE))
}

#[derive(Debug, Clone)]
pub struct Trainer {
    boundary: Boundary,
    perceptron: Perceptron,
}

impl Trainer {
    pub fn new(boundary: Boundary, perceptron: Perceptron) -> Result<Self, PerceptronError> {
        if perceptron.number_of_inputs() != INPUT_DIMENSIONS {
            return Err(PerceptronError::DimensionMismatch {
                expected: INPUT_DIMENSIONS,
                got: perceptron.number_of_inputs(),
            });
        }

        Ok(Self {
            boundary,
            perceptron,
        })
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn perceptron(&self) -> &Perceptron {
        &self.perceptron
    }

    pub fn into_perceptron(self) -> Perceptron {
        self.perceptron
    }

    pub fn train<R: Rng>(
        &mut self,
        rng: &mut R,
        number_of_iterations: usize,
        learning_rate: f64,
    ) -> Result<(), PerceptronError> {
        self.train_observed(rng, number_of_iterations, learning_rate, &mut NoopObserver)
    }

    /// Runs `number_of_iterations` steps of online training on freshly
    /// sampled points. Arguments are validated before the perceptron is
    /// touched.
    pub fn train_observed<R: Rng>(
        &mut self,
        rng: &mut R,
        number_of_iterations: usize,
        learning_rate: f64,
        observer: &mut dyn ClassificationObserver,
    ) -> Result<(), PerceptronError> {
        if number_of_iterations == 0 {
            return Err(PerceptronError::NoIterations);
        }
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(PerceptronError::InvalidLearningRate(learning_rate));
        }

        observer.on_boundary(&self.boundary);

        let mut corrections = 0usize;

        for _ in 0..number_of_iterations {
            let point = sample_point(rng);
            let inputs = point.coords.as_slice();

            let actual = self.perceptron.activate(inputs)?;
            let expected = self.boundary.classify(&point);
            observer.on_classification(&point, actual, expected);

            let delta = i32::from(expected) - i32::from(actual);
            if delta != 0 {
                corrections += 1;
            }

            self.perceptron.adjust(inputs, delta, learning_rate)?;
        }

        tracing::debug!(
            number_of_iterations,
            corrections,
            bias = self.perceptron.bias(),
            "training pass finished"
        );

        Ok(())
    }

    pub fn verify<R: Rng>(&self, rng: &mut R) -> Result<usize, PerceptronError> {
        self.verify_observed(rng, &mut NoopObserver)
    }

    /// Counts how many of [`VERIFICATION_SAMPLES`] fresh points the perceptron
    /// classifies the same way as the boundary.
    pub fn verify_observed<R: Rng>(
        &self,
        rng: &mut R,
        observer: &mut dyn ClassificationObserver,
    ) -> Result<usize, PerceptronError> {
        observer.on_boundary(&self.boundary);

        let mut correct_answers = 0;

        for _ in 0..VERIFICATION_SAMPLES {
            let point = sample_point(rng);

            let predicted = self.perceptron.activate(point.coords.as_slice())?;
            let expected = self.boundary.classify(&point);
            observer.on_classification(&point, predicted, expected);

            if predicted == expected {
                correct_answers += 1;
            }
        }

        Ok(correct_answers)
    }
}
