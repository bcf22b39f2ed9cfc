//! TOML configuration reader and the `mu`/`xi` XOR validation deferred from
//! `abcd_core::Params::new`.

use std::path::PathBuf;

use abcd_core::Mixing;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct RawConfig {
    seed: Option<u64>,
    n: u32,
    t1: f64,
    d_min: u32,
    d_max: u32,
    d_max_iter: u32,
    t2: f64,
    c_min: u32,
    c_max: u32,
    c_max_iter: u32,
    mu: Option<f64>,
    xi: Option<f64>,
    #[serde(rename = "isCL")]
    is_cl: bool,
    #[serde(rename = "islocal", default)]
    is_local: bool,
    network_file: PathBuf,
    community_file: PathBuf,
    degree_file: PathBuf,
    community_size_file: PathBuf,
}

/// Degree-sampler parameters (`t1`, `d_min`, `d_max`, `d_max_iter`).
#[derive(Debug, Clone, Copy)]
pub struct DegreeSamplerConfig {
    pub t1: f64,
    pub d_min: u32,
    pub d_max: u32,
    pub d_max_iter: u32,
}

/// Community-size-sampler parameters (`t2`, `c_min`, `c_max`, `c_max_iter`).
#[derive(Debug, Clone, Copy)]
pub struct SizeSamplerConfig {
    pub t2: f64,
    pub c_min: u32,
    pub c_max: u32,
    pub c_max_iter: u32,
}

/// The four output file paths.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub network_file: PathBuf,
    pub community_file: PathBuf,
    pub degree_file: PathBuf,
    pub community_size_file: PathBuf,
}

/// A fully validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub seed: u64,
    pub n: u32,
    pub degree: DegreeSamplerConfig,
    pub size: SizeSamplerConfig,
    pub mixing: Mixing,
    pub is_cl: bool,
    pub is_local: bool,
    pub outputs: OutputPaths,
}

impl Config {
    /// Parses and validates a configuration from TOML source text.
    pub fn from_toml_str(text: &str) -> Result<Self, CliError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, CliError> {
        let mixing = match (raw.mu, raw.xi) {
            (Some(mu), None) => Mixing::Mu(mu),
            (None, Some(xi)) => Mixing::Xi(xi),
            (Some(_), Some(_)) => {
                return Err(CliError::InvalidConfig(
                    "exactly one of `mu`/`xi` may be given, both were supplied".into(),
                ))
            }
            (None, None) => {
                return Err(CliError::InvalidConfig(
                    "exactly one of `mu`/`xi` must be given, neither was supplied".into(),
                ))
            }
        };
        if matches!(mixing, Mixing::Xi(_)) && raw.is_local {
            return Err(CliError::InvalidConfig(
                "`xi` cannot be combined with `islocal`".into(),
            ));
        }

        let seed = raw.seed.unwrap_or_else(default_seed);

        Ok(Config {
            seed,
            n: raw.n,
            degree: DegreeSamplerConfig {
                t1: raw.t1,
                d_min: raw.d_min,
                d_max: raw.d_max,
                d_max_iter: raw.d_max_iter,
            },
            size: SizeSamplerConfig {
                t2: raw.t2,
                c_min: raw.c_min,
                c_max: raw.c_max,
                c_max_iter: raw.c_max_iter,
            },
            mixing,
            is_cl: raw.is_cl,
            is_local: raw.is_local,
            outputs: OutputPaths {
                network_file: raw.network_file,
                community_file: raw.community_file,
                degree_file: raw.degree_file,
                community_size_file: raw.community_size_file,
            },
        })
    }
}

/// Falls back to a time-derived seed when the configuration leaves `seed`
/// empty.
fn default_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
