use std::ops::RangeInclusive;

use nalgebra::Point2;
use rand::Rng;

use crate::perceptron::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    a: i32,
    b: i32,
}

impl Boundary {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    pub fn random<R: Rng>(
        slope_range: RangeInclusive<i32>,
        intercept_range: RangeInclusive<i32>,
        rng: &mut R,
    ) -> Self {
        Self {
            a: rng.gen_range(slope_range),
            b: rng.gen_range(intercept_range),
        }
    }

    pub fn slope(&self) -> i32 {
        self.a
    }

    pub fn intercept(&self) -> i32 {
        self.b
    }

    /// Widened so any `i32` slope and intercept stay exact.
    pub fn evaluate(&self, x: i32) -> i64 {
        i64::from(self.a) * i64::from(x) + i64::from(self.b)
    }

    /// 1 if the point lies strictly above the line, 0 on or below it.
    pub fn classify(&self, point: &Point2<i32>) -> Label {
        Label::from(i64::from(point.y) > self.evaluate(point.x))
    }
}
