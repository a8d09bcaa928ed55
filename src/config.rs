//! Run configuration for the training driver, read from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! iterations = 1000
//! learning_rate = 0.1
//! slope_range = [-5, 5]
//! intercept_range = [-50, 50]
//! verification_rounds = 100
//! seed = 42
//! plot_path = "perceptron.svg"
//! chart_path = "success_rate.svg"
//! report_path = "success_rate.csv"
//! ```

use std::{
    fmt::Display,
    fs,
    ops::RangeInclusive,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    pub slope_range: [i32; 2],
    pub intercept_range: [i32; 2],
    pub verification_rounds: usize,
    /// Fixed seed for the random source. A fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub plot_path: Option<PathBuf>,
    pub chart_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            learning_rate: 0.1,
            slope_range: [-5, 5],
            intercept_range: [-50, 50],
            verification_rounds: 100,
            seed: None,
            plot_path: Some(PathBuf::from("perceptron.svg")),
            chart_path: Some(PathBuf::from("success_rate.svg")),
            report_path: None,
        }
    }
}

impl FromStr for RunConfig {
    type Err = ConfigError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;

        Ok(config)
    }
}

fn flag_value<T>(args: &[String], flag: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(position) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };

    let value = args
        .get(position + 1)
        .ok_or(ConfigError::MissingValue { flag })?;

    value
        .parse()
        .map(Some)
        .map_err(|err: T::Err| ConfigError::InvalidFlag {
            flag,
            value: value.clone(),
            reason: err.to_string(),
        })
}

impl RunConfig {
    /// Builds the driver configuration from command-line arguments: the file
    /// named by `--config` (or the defaults), then flag overrides.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = match flag_value::<PathBuf>(args, "--config")? {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        config.apply_args(args)?;

        Ok(config)
    }

    /// Applies `--iterations`, `--learning-rate` and `--seed` and validates
    /// the result.
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ConfigError> {
        if let Some(iterations) = flag_value(args, "--iterations")? {
            self.iterations = iterations;
        }
        if let Some(learning_rate) = flag_value(args, "--learning-rate")? {
            self.learning_rate = learning_rate;
        }
        if let Some(seed) = flag_value(args, "--seed")? {
            self.seed = Some(seed);
        }

        self.validate()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        contents.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "iterations",
                reason: "must be at least 1".to_string(),
            });
        }

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "learning_rate",
                reason: format!("{} is outside (0, 1]", self.learning_rate),
            });
        }

        for (field, [low, high]) in [
            ("slope_range", self.slope_range),
            ("intercept_range", self.intercept_range),
        ] {
            if low > high {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("lower bound {low} is above upper bound {high}"),
                });
            }
        }

        Ok(())
    }

    pub fn slope_range(&self) -> RangeInclusive<i32> {
        self.slope_range[0]..=self.slope_range[1]
    }

    pub fn intercept_range(&self) -> RangeInclusive<i32> {
        self.intercept_range[0]..=self.intercept_range[1]
    }
}
