//! Command-line front-end for the ABCD graph generator.
//!
//! Reads a TOML configuration, samples the degree and community-size
//! sequences, runs `abcd_core::generate`, and writes the four output files.

mod config;
mod error;
mod samplers;
mod writer;

use std::path::PathBuf;
use std::process::ExitCode;

use abcd_core::Params;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use config::Config;
use error::CliError;

/// Generates an ABCD benchmark graph from a TOML configuration file.
#[derive(Debug, Parser)]
#[command(name = "abcd", about = "Generate an ABCD community-detection benchmark graph")]
struct Cli {
    /// Path to the TOML configuration file.
    config: PathBuf,
}

fn try_main(cli: Cli) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&cli.config)?;
    let config = Config::from_toml_str(&text)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let w = samplers::sample_degrees(
        &mut rng,
        config.degree.t1,
        config.degree.d_min,
        config.degree.d_max,
        config.degree.d_max_iter,
        config.n,
    )?;
    let s = samplers::sample_sizes(
        &mut rng,
        config.size.t2,
        config.size.c_min,
        config.size.c_max,
        config.size.c_max_iter,
        config.n,
    )?;

    let params = Params::new(w.clone(), s.clone(), config.mixing, config.is_cl, config.is_local)?;
    let report = abcd_core::generate(&params, config.seed)?;

    if report.anomalies.global_collisions > 0 {
        warn!(
            count = report.anomalies.global_collisions,
            "global stub pairing collisions"
        );
    }
    if report.anomalies.unresolved_cluster_collisions > 0 {
        warn!(
            count = report.anomalies.unresolved_cluster_collisions,
            "unresolved cluster collisions"
        );
    }
    if report.anomalies.unresolved_global_collisions > 0 {
        warn!(
            count = report.anomalies.unresolved_global_collisions,
            "unresolved global collisions"
        );
    }

    writer::write_network_file(&config.outputs.network_file, &report.edges)?;
    writer::write_community_file(&config.outputs.community_file, &report.clusters)?;
    writer::write_sequence_file(&config.outputs.degree_file, &w)?;
    writer::write_sequence_file(&config.outputs.community_size_file, &s)?;

    info!(
        n = params.n(),
        k = params.k(),
        edges = report.edges.len(),
        "generation complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            ExitCode::FAILURE
        }
    }
}
