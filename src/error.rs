use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PerceptronError {
    #[error("a perceptron needs at least one input")]
    NoInputs,

    #[error("dimension mismatch: expected {expected} inputs, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("learning rate must be in (0, 1], got {0}")]
    InvalidLearningRate(f64),

    #[error("number of iterations must be at least 1")]
    NoIterations,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("missing value for {flag}")]
    MissingValue { flag: &'static str },

    #[error("cannot parse `{value}` for {flag}: {reason}")]
    InvalidFlag {
        flag: &'static str,
        value: String,
        reason: String,
    },
}
