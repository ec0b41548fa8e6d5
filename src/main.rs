use std::env;
use std::process;

use ant_system_tsp::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::build(env::args()).unwrap_or_else(|err| {
        eprintln!("Problem parsing arguments: {err}");
        process::exit(1);
    });

    match ant_system_tsp::run(&config) {
        Ok(summary) => println!(
            "Best tour length: {:.4} (nearest neighbor: {:.4})\nTour: {:?}",
            summary.best_length, summary.initial_length, summary.best_tour
        ),
        Err(e) => {
            eprintln!("Application error: {e}");
            process::exit(1);
        }
    }
}
