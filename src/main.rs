use std::error::Error;

use perceptron::{
    boundary::Boundary,
    config::RunConfig,
    perceptron::Perceptron,
    render::{plot_success_rates, PlotRenderer},
    report::{mean_success_rate, success_rate_series, write_series_to_file},
    trainer::{Trainer, INPUT_DIMENSIONS},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const PLOT_SIZE: (u32, u32) = (600, 600);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = RunConfig::from_args(&args)?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, "random source seeded");

    let boundary = Boundary::random(config.slope_range(), config.intercept_range(), &mut rng);
    let perceptron = Perceptron::new(INPUT_DIMENSIONS, &mut rng)?;
    let mut trainer = Trainer::new(boundary, perceptron)?;

    tracing::info!(
        a = boundary.slope(),
        b = boundary.intercept(),
        iterations = config.iterations,
        learning_rate = config.learning_rate,
        "training against y = a*x + b"
    );

    trainer.train(&mut rng, config.iterations, config.learning_rate)?;

    let mut renderer = PlotRenderer::new();
    let correct = trainer.verify_observed(&mut rng, &mut renderer)?;
    println!("verification: {correct}/100 points classified correctly");

    let series = success_rate_series(&trainer, &mut rng, config.verification_rounds)?;
    if let Some(mean) = mean_success_rate(&series) {
        println!(
            "mean success rate over {} rounds: {mean:.3}%",
            config.verification_rounds
        );
    }

    if let Some(plot_path) = &config.plot_path {
        renderer.render_to_svg(plot_path, PLOT_SIZE, trainer.perceptron().decision_line())?;
        tracing::info!(path = %plot_path.display(), "wrote classification plot");
    }
    if let Some(chart_path) = &config.chart_path {
        plot_success_rates(chart_path, &series)?;
        tracing::info!(path = %chart_path.display(), "wrote success-rate chart");
    }
    if let Some(report_path) = &config.report_path {
        write_series_to_file(report_path, &series)?;
        tracing::info!(path = %report_path.display(), "wrote success-rate report");
    }

    Ok(())
}
