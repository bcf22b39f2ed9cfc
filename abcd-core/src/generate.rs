//! Top-level generation driver: assigns clusters, then dispatches to the
//! Chung-Lu or configuration-model engine, converting the internal 0-based
//! representation to the 1-based external one on the way out.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assignment::assign_clusters;
use crate::cl::generate_cl;
use crate::cm::{generate_cm, CmAnomalies};
use crate::edge_set::Edge;
use crate::error::AbcdError;
use crate::params::Params;

/// Non-fatal anomaly counts from a run. Always zero for the Chung-Lu
/// engine, which has no rewiring step to report on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anomalies {
    pub global_collisions: usize,
    pub unresolved_cluster_collisions: usize,
    pub unresolved_global_collisions: usize,
}

impl From<CmAnomalies> for Anomalies {
    fn from(value: CmAnomalies) -> Self {
        Anomalies {
            global_collisions: value.global_collisions,
            unresolved_cluster_collisions: value.unresolved_cluster_collisions,
            unresolved_global_collisions: value.unresolved_global_collisions,
        }
    }
}

/// A completed generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Edges as `(a, b)` with `1 <= a < b <= n`.
    pub edges: Vec<Edge>,
    /// `clusters[i]` is the 1-based community of vertex `i + 1`.
    pub clusters: Vec<usize>,
    pub anomalies: Anomalies,
}

/// Runs the full generation pipeline for `params`, seeded by `seed`.
pub fn generate(params: &Params, seed: u64) -> Result<GenerateReport, AbcdError> {
    let mut assign_rng = StdRng::seed_from_u64(seed);
    let clusters0 = assign_clusters(params, &mut assign_rng)?;

    let (edges0, anomalies) = if params.is_cl {
        (generate_cl(params, &clusters0, seed)?, Anomalies::default())
    } else {
        let result = generate_cm(params, &clusters0, seed)?;
        (result.edges, result.anomalies.into())
    };

    let edges = edges0.into_iter().map(|(a, b)| (a + 1, b + 1)).collect();
    let clusters = clusters0.into_iter().map(|c| c + 1).collect();

    Ok(GenerateReport {
        edges,
        clusters,
        anomalies,
    })
}
