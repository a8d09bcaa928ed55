use std::{error::Error, path::Path};

use csv::Writer;
use rand::Rng;
use serde::Serialize;

use crate::{
    error::PerceptronError,
    trainer::{Trainer, VERIFICATION_SAMPLES},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessSample {
    pub round: usize,
    pub correct: usize,
    /// Set when `correct` is a display anchor rather than a measurement.
    pub clamped: bool,
}

/// Runs `rounds` verification passes. The first round is pinned to 0 and the
/// last to 100 so a chart of the series always spans the full scale; those
/// two rounds are not measured.
pub fn success_rate_series<R: Rng>(
    trainer: &Trainer,
    rng: &mut R,
    rounds: usize,
) -> Result<Vec<SuccessSample>, PerceptronError> {
    let mut series = Vec::with_capacity(rounds);

    for round in 1..=rounds {
        let sample = if round == 1 {
            SuccessSample {
                round,
                correct: 0,
                clamped: true,
            }
        } else if round == rounds {
            SuccessSample {
                round,
                correct: VERIFICATION_SAMPLES,
                clamped: true,
            }
        } else {
            SuccessSample {
                round,
                correct: trainer.verify(rng)?,
                clamped: false,
            }
        };

        series.push(sample);
    }

    if rounds > 0 {
        tracing::debug!(rounds, "first and last success-rate samples are display anchors");
    }

    Ok(series)
}

pub fn mean_success_rate(series: &[SuccessSample]) -> Option<f64> {
    let measured: Vec<usize> = series
        .iter()
        .filter(|sample| !sample.clamped)
        .map(|sample| sample.correct)
        .collect();

    if measured.is_empty() {
        return None;
    }

    let total: usize = measured.iter().sum();

    Some(total as f64 / measured.len() as f64 * 100.0 / VERIFICATION_SAMPLES as f64)
}

pub fn write_series<W: std::io::Write>(
    writer: W,
    series: &[SuccessSample],
) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_writer(writer);

    for sample in series {
        writer.serialize(sample)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn write_series_to_file<P: AsRef<Path>>(
    file_path: P,
    series: &[SuccessSample],
) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(file_path)?;

    write_series(std::io::BufWriter::new(file), series)
}
