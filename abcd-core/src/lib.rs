//! Random graph generator for the ABCD community-detection benchmark model.
//!
//! [`generate`] is the entry point: given validated [`Params`], it assigns
//! vertices to communities and then fills in edges with either the
//! Chung-Lu engine or the configuration-model engine, depending on
//! [`Params::is_cl`].

mod assignment;
mod cl;
mod cm;
mod edge_set;
mod error;
mod generate;
mod mixing;
mod params;
mod sampling;

pub use edge_set::Edge;
pub use error::AbcdError;
pub use generate::{generate, Anomalies, GenerateReport};
pub use params::{Mixing, Params};
