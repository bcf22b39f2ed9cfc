//! Property-based tests for the universal invariants any valid run must
//! satisfy, regardless of seed or engine.

use std::collections::HashSet;

use abcd_core::{generate, AbcdError, Mixing, Params};
use proptest::prelude::*;

fn build_params(num_clusters: usize, cluster_size: usize, degree: u32, mu: f64, is_cl: bool) -> Params {
    let k = num_clusters;
    let n = cluster_size * k;
    let s: Vec<u32> = vec![cluster_size as u32; k];
    let mut w: Vec<u32> = vec![degree; n];
    if (n as u64 * degree as u64) % 2 != 0 {
        w[0] += 1;
    }
    Params::new(w, s, Mixing::Mu(mu), is_cl, false).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Invariants 1, 2, 3, 4, 7 from the universal-invariants list: cluster
    /// sizes are honored, edges are simple, CM degrees/edge counts match the
    /// prescribed sequence when nothing is left unresolved, and re-running
    /// with the same seed reproduces the same output.
    #[test]
    fn invariants_hold_for_valid_params(
        num_clusters in 2usize..5,
        cluster_size in 6usize..12,
        degree in 1u32..3,
        mu in 0.0f64..0.4,
        is_cl in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let params = build_params(num_clusters, cluster_size, degree, mu, is_cl);
        let Ok(report) = generate(&params, seed) else {
            // A handful of (degree, mu) combinations legitimately compute a
            // background fraction >= 1; that is MuTooLarge, not a property
            // violation, so such draws are simply skipped.
            return Ok(());
        };

        for c in 1..=params.k() {
            let count = report.clusters.iter().filter(|&&x| x == c).count();
            prop_assert_eq!(count, params.s[c - 1] as usize);
        }

        let mut seen = HashSet::new();
        for &(a, b) in &report.edges {
            prop_assert!(a < b);
            prop_assert!(a >= 1 && (b as usize) <= params.n());
            prop_assert!(seen.insert((a, b)));
        }

        if !params.is_cl
            && report.anomalies.unresolved_cluster_collisions == 0
            && report.anomalies.unresolved_global_collisions == 0
        {
            let mut degree_count = vec![0u32; params.n()];
            for &(a, b) in &report.edges {
                degree_count[a as usize - 1] += 1;
                degree_count[b as usize - 1] += 1;
            }
            prop_assert_eq!(degree_count, params.w.clone());
            prop_assert_eq!(report.edges.len() as u32, params.w.iter().sum::<u32>() / 2);
        }

        let report2 = generate(&params, seed).unwrap();
        prop_assert_eq!(report.clusters, report2.clusters);
        let edges_a: HashSet<_> = report.edges.iter().copied().collect();
        let edges_b: HashSet<_> = report2.edges.iter().copied().collect();
        prop_assert_eq!(edges_a, edges_b);
    }
}

/// Invariant 5: configuration errors are raised exactly for the listed
/// preconditions, and not otherwise.
#[test]
fn invariant_5_configuration_errors_are_precise() {
    assert!(matches!(
        Params::new(vec![1, 1, 1], vec![2, 2], Mixing::Mu(0.1), true, false).unwrap_err(),
        AbcdError::ConfigInconsistent(_)
    ));
    assert!(matches!(
        Params::new(vec![2, 2], vec![2], Mixing::Xi(0.1), true, true).unwrap_err(),
        AbcdError::ConfigInconsistent(_)
    ));
    assert!(matches!(
        Params::new(vec![2, 2], vec![2], Mixing::Mu(1.5), true, false).unwrap_err(),
        AbcdError::ConfigInconsistent(_)
    ));
    assert!(Params::new(vec![2, 2, 2, 2], vec![2, 2], Mixing::Mu(0.2), true, false).is_ok());
}

/// Invariant 6: rewiring loops terminate even on an instance engineered to
/// maximize collisions (every vertex carries the same degree, all stubs
/// drawn from one small cluster).
#[test]
fn invariant_6_rewiring_terminates_on_collision_heavy_input() {
    let w = vec![4u32; 20];
    let s = vec![20u32];
    let params = Params::new(w, s, Mixing::Mu(0.0), false, false).unwrap();
    let report = generate(&params, 99).unwrap();
    assert_eq!(report.clusters.len(), 20);
}
