//! Chung-Lu engine: independent weighted-pair sampling until each
//! cluster's, then the background graph's, target edge count is met.

use rayon::prelude::*;

use crate::edge_set::{ordered_pair, Edge, EdgeSet};
use crate::error::AbcdError;
use crate::mixing::{cluster_weights, compute_xi};
use crate::params::Params;
use crate::sampling::{randround, task_rng, weighted_sample_with_replacement};

/// Runs the Chung-Lu engine. `clusters[i]` is the 0-based community of
/// vertex `i`; `seed` drives one independent RNG stream per cluster plus
/// one for the background phase.
pub fn generate_cl(params: &Params, clusters: &[usize], seed: u64) -> Result<Vec<Edge>, AbcdError> {
    let k = params.k();
    let (cluster_weight, total) = cluster_weights(&params.w, clusters, k);
    let xi = compute_xi(params, &cluster_weight, total)?;

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &c) in clusters.iter().enumerate() {
        members[c].push(i);
    }

    let per_cluster: Vec<EdgeSet> = members
        .par_iter()
        .enumerate()
        .map(|(c, idx)| {
            let mut rng = task_rng(seed, c as u64 + 1);
            let wc: Vec<f64> = idx.iter().map(|&i| params.w[i] as f64).collect();
            let xic = xi.for_cluster(c);
            let sum_wc: f64 = wc.iter().sum();
            let target = randround(&mut rng, (1.0 - xic) * sum_wc / 2.0) as usize;

            let mut edges = EdgeSet::with_capacity(target);
            while edges.len() < target {
                let remaining = target - edges.len();
                let batch_a = weighted_sample_with_replacement(&mut rng, &wc, remaining);
                let batch_b = weighted_sample_with_replacement(&mut rng, &wc, remaining);
                for (&pa, &pb) in batch_a.iter().zip(batch_b.iter()) {
                    let a = idx[pa] as u32;
                    let b = idx[pb] as u32;
                    if let Some(edge) = ordered_pair(a, b) {
                        edges.insert(edge);
                    }
                }
                if wc.iter().all(|&w| w == 0.0) {
                    // No vertex in this cluster has remaining weight to
                    // place edges with; stop rather than loop forever.
                    break;
                }
            }
            edges
        })
        .collect();

    let mut all_edges: EdgeSet = EdgeSet::new();
    for set in per_cluster {
        for &edge in set.iter() {
            all_edges.insert(edge);
        }
    }

    let mut wwt = vec![0.0_f64; params.n()];
    for (i, &c) in clusters.iter().enumerate() {
        wwt[i] = xi.for_cluster(c) * params.w[i] as f64;
    }
    let target_total = (total / 2.0).round() as usize;
    let mut bg_rng = task_rng(seed, 0);
    let mut guard = 0usize;
    let guard_limit = target_total.max(1) * 64 + 1024;
    while all_edges.len() < target_total && guard < guard_limit {
        guard += 1;
        let remaining = target_total.saturating_sub(all_edges.len());
        if remaining == 0 {
            break;
        }
        let batch_a = weighted_sample_with_replacement(&mut bg_rng, &wwt, remaining);
        let batch_b = weighted_sample_with_replacement(&mut bg_rng, &wwt, remaining);
        for (&a, &b) in batch_a.iter().zip(batch_b.iter()) {
            if let Some(edge) = ordered_pair(a as u32, b as u32) {
                all_edges.insert(edge);
            }
        }
    }

    Ok(all_edges.into_vec())
}
