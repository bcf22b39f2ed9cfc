//! Greedy, largest-degree-first cluster assignment.

use rand::Rng;

use crate::error::AbcdError;
use crate::params::{Mixing, Params};
use crate::sampling::weighted_choice;

/// Assigns each vertex (by position in `params.w`, already sorted
/// descending) to a community, returning a 0-based cluster id per vertex.
///
/// Vertices are processed heaviest-first so that, by the time a vertex is
/// placed, every cluster still admissible for it is provably large enough
/// to absorb its intra-cluster degree share.
pub fn assign_clusters<R: Rng + ?Sized>(
    params: &Params,
    rng: &mut R,
) -> Result<Vec<usize>, AbcdError> {
    let n = params.n();
    let k = params.k();

    let mul = match params.mixing {
        Mixing::Mu(mu) => 1.0 - mu,
        Mixing::Xi(xi) => {
            let total = params.n() as f64;
            let phi = 1.0
                - params
                    .s
                    .iter()
                    .map(|&sc| (sc as f64 / total).powi(2))
                    .sum::<f64>();
            1.0 - xi * phi
        }
    };

    let mut slots: Vec<u32> = params.s.clone();
    let mut clusters = Vec::with_capacity(n);
    let mut j = 0usize;

    for &wi in &params.w {
        while j < k && mul * wi as f64 + 1.0 <= slots_capacity(&params.s, j) {
            j += 1;
        }
        if j == 0 {
            return Err(AbcdError::infeasible_cluster(format!(
                "no cluster large enough for vertex with degree {wi}"
            )));
        }
        let weights: Vec<f64> = slots[..j].iter().map(|&slot| slot as f64).collect();
        let loc = weighted_choice(rng, &weights).ok_or_else(|| {
            AbcdError::no_slot(format!(
                "no remaining capacity among the {j} admissible clusters"
            ))
        })?;
        clusters.push(loc);
        slots[loc] -= 1;
    }

    Ok(clusters)
}

/// The *original* size of cluster `j` (0-based), used for the admissibility
/// frontier test. The frontier test is evaluated against the fixed sizes in
/// `s`, not the shrinking `slots`: a cluster's eligibility depends on its
/// total capacity, not how much of it remains unfilled.
fn slots_capacity(s: &[u32], j: usize) -> f64 {
    s[j] as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn respects_cluster_sizes() {
        let params = Params::new(
            vec![3, 3, 2, 2, 1, 1],
            vec![4, 2],
            Mixing::Mu(0.2),
            true,
            false,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let clusters = assign_clusters(&params, &mut rng).unwrap();
        assert_eq!(clusters.len(), 6);
        let count_0 = clusters.iter().filter(|&&c| c == 0).count();
        let count_1 = clusters.iter().filter(|&&c| c == 1).count();
        assert_eq!(count_0, 4);
        assert_eq!(count_1, 2);
    }

    #[test]
    fn rejects_vertex_too_heavy_for_any_cluster() {
        // A single giant-degree vertex that no cluster (even the largest)
        // can admit once mul*w+1 exceeds every cluster's size.
        let params = Params::new(vec![100, 1, 1, 1], vec![2, 2], Mixing::Mu(0.0), true, false)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = assign_clusters(&params, &mut rng).unwrap_err();
        assert!(matches!(err, AbcdError::InfeasibleCluster(_)));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let params = Params::new(
            vec![3, 3, 2, 2, 1, 1],
            vec![4, 2],
            Mixing::Mu(0.2),
            true,
            false,
        )
        .unwrap();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = assign_clusters(&params, &mut rng_a).unwrap();
        let b = assign_clusters(&params, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
