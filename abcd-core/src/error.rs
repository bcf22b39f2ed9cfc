//! Unified error type for the ABCD generator.
//!
//! Mirrors the flat, `Display`-driven error enum used throughout the graph
//! generators this crate is descended from: one variant per failure mode
//! named in the model, each carrying a human-readable message.

use std::error::Error;
use std::fmt;

/// Errors raised while validating parameters or running the generator.
///
/// All variants here are fatal: a `Params` construction error or an engine
/// precondition failure aborts `generate` before any edges are produced.
/// Non-fatal anomalies (unresolved collisions) are not errors — they are
/// counted and returned as part of a successful `GenerateReport`.
#[derive(Debug)]
pub enum AbcdError {
    /// The supplied parameters are mutually inconsistent (e.g. `sum(s) != n`,
    /// both or neither of `mu`/`xi` given, or `xi` combined with `is_local`).
    ConfigInconsistent(String),
    /// No cluster is large enough to host a vertex's intra-cluster degree.
    InfeasibleCluster(String),
    /// Remaining capacity among admissible clusters is exhausted.
    NoSlot(String),
    /// The computed background fraction `xi` (local or global) is `>= 1`.
    MuTooLarge(String),
}

impl AbcdError {
    /// Creates a [`AbcdError::ConfigInconsistent`] with the given message.
    pub fn config_inconsistent(message: impl Into<String>) -> Self {
        AbcdError::ConfigInconsistent(message.into())
    }

    /// Creates a [`AbcdError::InfeasibleCluster`] with the given message.
    pub fn infeasible_cluster(message: impl Into<String>) -> Self {
        AbcdError::InfeasibleCluster(message.into())
    }

    /// Creates a [`AbcdError::NoSlot`] with the given message.
    pub fn no_slot(message: impl Into<String>) -> Self {
        AbcdError::NoSlot(message.into())
    }

    /// Creates a [`AbcdError::MuTooLarge`] with the given message.
    pub fn mu_too_large(message: impl Into<String>) -> Self {
        AbcdError::MuTooLarge(message.into())
    }
}

impl fmt::Display for AbcdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AbcdError::ConfigInconsistent(msg) => write!(f, "inconsistent configuration: {msg}"),
            AbcdError::InfeasibleCluster(msg) => write!(f, "cluster too small for vertex: {msg}"),
            AbcdError::NoSlot(msg) => write!(f, "no admissible cluster slot remaining: {msg}"),
            AbcdError::MuTooLarge(msg) => write!(f, "mixing parameter too large: {msg}"),
        }
    }
}

impl Error for AbcdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_variant() {
        let err = AbcdError::config_inconsistent("sum(s) != n");
        assert_eq!(
            format!("{err}"),
            "inconsistent configuration: sum(s) != n"
        );
        let err = AbcdError::mu_too_large("xi_g = 1.2");
        assert_eq!(format!("{err}"), "mixing parameter too large: xi_g = 1.2");
    }
}
