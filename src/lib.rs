//! Approximate solver for the symmetric Euclidean TSP using the Ant System
//! metaheuristic.
//!
//! The library side is [`AntSystem`]: build it from a set of [`Location`]s
//! and [`AsParams`], call [`AntSystem::iterate`] as many times as wanted, and
//! read the best tour through its accessors. [`run`] is the driver used by
//! the binary.

pub mod config;
pub mod distance;
pub mod error;
pub mod matrix;
pub mod parser;
pub mod render;
pub mod solver;
pub mod stats;
pub mod tour;

use std::time::Instant;

use tracing::{info, warn};

pub use config::Config;
pub use distance::{DistanceTable, Location};
pub use error::{AcoError, Result};
pub use matrix::SquareMatrix;
pub use parser::{parse_locations, read_locations};
pub use render::{Viewport, render_svg, write_svg};
pub use solver::{AntSystem, AsParams};
pub use stats::RunStats;
pub use tour::{is_permutation, nearest_neighbor_tour, tour_length};

/// Outcome of a driver run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub best_tour: Vec<usize>,
    pub best_length: f64,
    pub initial_length: f64,
    /// Wall-clock duration of each `iterate` call, in milliseconds.
    pub iteration_times: RunStats,
}

/// Loads the locations named by `config`, then runs the colony for
/// `config.num_iters` iterations.
pub fn run(config: &Config) -> Result<RunSummary> {
    let file_path = config
        .file_path
        .as_deref()
        .ok_or_else(|| AcoError::InvalidInput("no locations file given".to_string()))?;
    let locations = parse_locations(file_path)?;
    info!("Loaded {} locations from {}", locations.len(), file_path);
    solve(locations, config)
}

/// Runs the colony over already-loaded locations with the options in `config`.
pub fn solve(locations: Vec<Location>, config: &Config) -> Result<RunSummary> {
    let params = config.params();
    let mut aco = match config.seed {
        Some(seed) => AntSystem::with_seed(locations, params, seed)?,
        None => AntSystem::new(locations, params)?,
    };

    let initial_length = aco.best_length();
    info!("Nearest neighbor tour length: {:.4}", initial_length);

    let mut iteration_times = RunStats::new();
    let mut best_length = initial_length;
    for iteration in 0..config.num_iters {
        let started = Instant::now();
        aco.iterate();
        iteration_times.add_observation(started.elapsed().as_secs_f64() * 1000.0);

        if aco.best_length() < best_length {
            best_length = aco.best_length();
            info!("Iter {}: best length {:.4}", iteration, best_length);
        } else if config.report_every > 0 && iteration % config.report_every == 0 {
            info!("Iter {}: best length so far {:.4}", iteration, best_length);
        }
    }

    match aco.validate() {
        Ok(()) => info!("Valid tour"),
        Err(e) => {
            warn!("Best tour failed validation: {}", e);
            return Err(e);
        }
    }

    if let Some(mean) = iteration_times.mean() {
        info!(
            "Mean iteration time: {:.3} ms (std dev {:.3} ms over {} iterations)",
            mean,
            iteration_times.std_dev().unwrap_or(0.0),
            iteration_times.count()
        );
    }

    let best_tour = aco.best_tour();
    if let Some(svg_path) = &config.svg_path {
        write_svg(svg_path, aco.locations(), &best_tour, &Viewport::default())?;
        info!("Wrote best tour to {}", svg_path);
    }

    Ok(RunSummary {
        best_tour,
        best_length: aco.best_length(),
        initial_length,
        iteration_times,
    })
}
