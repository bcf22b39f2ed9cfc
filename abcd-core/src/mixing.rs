//! Shared background-fraction computation, used by the Chung-Lu engine and
//! reused unchanged by the configuration-model engine's degree split.

use crate::error::AbcdError;
use crate::params::{Mixing, Params};

/// The resolved background fraction, either one value per cluster
/// (`is_local`) or a single global value.
#[derive(Debug, Clone)]
pub enum Xi {
    Local(Vec<f64>),
    Global(f64),
}

impl Xi {
    /// Returns the background fraction that applies to a vertex in cluster
    /// `cluster`.
    pub fn for_cluster(&self, cluster: usize) -> f64 {
        match self {
            Xi::Local(values) => values[cluster],
            Xi::Global(value) => *value,
        }
    }
}

/// Computes the per-vertex cluster weight sums and the total weight.
pub fn cluster_weights(w: &[u32], clusters: &[usize], k: usize) -> (Vec<f64>, f64) {
    let mut cluster_weight = vec![0.0_f64; k];
    let mut total = 0.0_f64;
    for (&wi, &c) in w.iter().zip(clusters.iter()) {
        cluster_weight[c] += wi as f64;
        total += wi as f64;
    }
    (cluster_weight, total)
}

/// Computes `xi` (local or global) from `params`, failing with
/// [`AbcdError::MuTooLarge`] if the resulting value is `>= 1` anywhere.
///
/// The configuration-model engine's degree split reuses this unchanged: the
/// same background fraction that drives Chung-Lu edge targets also drives
/// how much of each vertex's degree is held back for intra-cluster stubs.
pub fn compute_xi(params: &Params, cluster_weight: &[f64], total: f64) -> Result<Xi, AbcdError> {
    if params.is_local {
        let Mixing::Mu(mu) = params.mixing else {
            unreachable!("Params::new rejects xi combined with is_local");
        };
        let local: Vec<f64> = cluster_weight
            .iter()
            .map(|&cw| mu / (1.0 - cw / total))
            .collect();
        if local.iter().any(|&x| x >= 1.0) {
            let max = local.iter().cloned().fold(f64::MIN, f64::max);
            return Err(AbcdError::mu_too_large(format!(
                "max local xi = {max} >= 1"
            )));
        }
        Ok(Xi::Local(local))
    } else {
        match params.mixing {
            Mixing::Xi(xi) => Ok(Xi::Global(xi)),
            Mixing::Mu(mu) => {
                let sum_sq: f64 = cluster_weight.iter().map(|&cw| (cw / total).powi(2)).sum();
                let xi_g = mu / (1.0 - sum_sq);
                if xi_g >= 1.0 {
                    return Err(AbcdError::mu_too_large(format!("xi_g = {xi_g} >= 1")));
                }
                Ok(Xi::Global(xi_g))
            }
        }
    }
}
