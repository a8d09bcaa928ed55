pub mod boundary;
pub mod config;
pub mod error;
pub mod perceptron;
pub mod render;
pub mod report;
pub mod trainer;
