//! Configuration-model engine: stub construction, random pairing, and
//! three-scope rewiring of self-loops and duplicate edges.

use std::collections::VecDeque;

use rand::Rng;
use rayon::prelude::*;

use crate::edge_set::{Edge, EdgeSet};
use crate::error::AbcdError;
use crate::mixing::{cluster_weights, compute_xi};
use crate::params::Params;
use crate::sampling::{randround, shuffle, task_rng};

/// Non-fatal anomaly counts produced by a run of the CM engine. These are
/// logged, not raised: the run still returns a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CmAnomalies {
    /// Duplicates found immediately after the initial global stub pairing,
    /// before any rewiring is attempted.
    pub global_collisions: usize,
    /// Edges left in per-cluster recycle queues after local rewiring.
    pub unresolved_cluster_collisions: usize,
    /// Edges left unresolved after global reconciliation and the
    /// last-resort cross-cluster pass.
    pub unresolved_global_collisions: usize,
}

/// Result of a configuration-model run.
#[derive(Debug, Clone)]
pub struct CmResult {
    pub edges: Vec<Edge>,
    pub anomalies: CmAnomalies,
}

enum PartnerSource {
    Recycle(usize),
    Edges(usize),
}

enum LastResortSource {
    Recycle(usize),
    Set(usize, usize),
}

fn order(a: u32, b: u32) -> Edge {
    (a.min(b), a.max(b))
}

/// Recombines two colliding pairs into two candidate edges: with
/// probability 1/2 pair firsts-with-firsts and seconds-with-seconds,
/// otherwise cross the seconds.
fn recombine<R: Rng + ?Sized>(rng: &mut R, p1: Edge, p2: Edge) -> (Edge, Edge) {
    if rng.random_bool(0.5) {
        (order(p1.0, p2.0), order(p1.1, p2.1))
    } else {
        (order(p1.0, p2.1), order(p1.1, p2.0))
    }
}

/// Resolves `recycle` against `edges` using the bounded-progress rewiring
/// loop shared by per-cluster local rewiring and the background
/// reconciliation pass that follows it (the two differ only in which edge
/// set and recycle queue they operate on).
fn bounded_rewire<R: Rng + ?Sized>(
    rng: &mut R,
    stubs_len: usize,
    edges: &mut EdgeSet,
    recycle: &mut VecDeque<Edge>,
) {
    if stubs_len == 0 {
        return;
    }
    let mut last = recycle.len();
    let mut counter = last as i64;
    while !recycle.is_empty() {
        counter -= 1;
        if counter < 0 {
            if recycle.len() < last {
                last = recycle.len();
                counter = last as i64;
            } else {
                break;
            }
        }

        let p1 = recycle.pop_front().expect("recycle is non-empty");
        let max_attempts = (stubs_len / 2).max(1);
        let mut resolved = false;

        for _ in 0..max_attempts {
            if recycle.is_empty() && edges.is_empty() {
                break;
            }
            let from_recycle_prob = (2.0 * recycle.len() as f64 / stubs_len as f64).clamp(0.0, 1.0);
            let draw_from_recycle =
                !recycle.is_empty() && (edges.is_empty() || rng.random_bool(from_recycle_prob));

            let (p2, source) = if draw_from_recycle {
                let idx = rng.random_range(0..recycle.len());
                (recycle[idx], PartnerSource::Recycle(idx))
            } else {
                let idx = rng.random_range(0..edges.len());
                (edges.get(idx), PartnerSource::Edges(idx))
            };

            let (newp1, newp2) = recombine(rng, p1, p2);
            let good = newp1 != newp2
                && newp1.0 != newp1.1
                && newp2.0 != newp2.1
                && !edges.contains(&newp1)
                && !edges.contains(&newp2);

            if good {
                match source {
                    PartnerSource::Recycle(idx) => {
                        recycle.remove(idx);
                    }
                    PartnerSource::Edges(idx) => {
                        edges.remove_at(idx);
                    }
                }
                edges.insert(newp1);
                edges.insert(newp2);
                resolved = true;
                break;
            }
        }

        if !resolved {
            recycle.push_back(p1);
        }
    }
}

/// Last-resort cross-cluster rewiring: partners are drawn from whichever
/// edge set (cluster or background) is chosen proportional to its current
/// size, and a candidate must be absent from *every* set to be accepted.
fn last_resort_rewire<R: Rng + ?Sized>(
    rng: &mut R,
    sets: &mut [EdgeSet],
    recycle: &mut VecDeque<Edge>,
    stubs_len: usize,
) {
    if stubs_len == 0 || sets.is_empty() {
        return;
    }
    let background = sets.len() - 1;
    let mut last = recycle.len();
    let mut counter = last as i64;
    while !recycle.is_empty() {
        counter -= 1;
        if counter < 0 {
            if recycle.len() < last {
                last = recycle.len();
                counter = last as i64;
            } else {
                break;
            }
        }

        let p1 = recycle.pop_front().expect("recycle is non-empty");
        let max_attempts = (stubs_len / 2).max(1);
        let mut resolved = false;

        for _ in 0..max_attempts {
            let total_size: usize = sets.iter().map(EdgeSet::len).sum();
            if recycle.is_empty() && total_size == 0 {
                break;
            }
            let from_recycle_prob = (2.0 * recycle.len() as f64 / stubs_len as f64).clamp(0.0, 1.0);
            let draw_from_recycle =
                !recycle.is_empty() && (total_size == 0 || rng.random_bool(from_recycle_prob));

            let (p2, source) = if draw_from_recycle {
                let idx = rng.random_range(0..recycle.len());
                (recycle[idx], LastResortSource::Recycle(idx))
            } else {
                let mut r = rng.random_range(0..total_size);
                let mut set_idx = 0;
                for (si, s) in sets.iter().enumerate() {
                    if r < s.len() {
                        set_idx = si;
                        break;
                    }
                    r -= s.len();
                }
                (sets[set_idx].get(r), LastResortSource::Set(set_idx, r))
            };

            let (newp1, newp2) = recombine(rng, p1, p2);
            let good = newp1 != newp2
                && newp1.0 != newp1.1
                && newp2.0 != newp2.1
                && !sets.iter().any(|s| s.contains(&newp1) || s.contains(&newp2));

            if good {
                let dest = match source {
                    LastResortSource::Recycle(idx) => {
                        recycle.remove(idx);
                        background
                    }
                    LastResortSource::Set(set_idx, idx) => {
                        sets[set_idx].remove_at(idx);
                        set_idx
                    }
                };
                sets[dest].insert(newp1);
                sets[dest].insert(newp2);
                resolved = true;
                break;
            }
        }

        if !resolved {
            recycle.push_back(p1);
        }
    }
}

fn build_stubs(members: &[usize], weight_of: impl Fn(usize) -> u32) -> Vec<u32> {
    let mut stubs = Vec::new();
    for &v in members {
        stubs.extend(std::iter::repeat(v as u32).take(weight_of(v) as usize));
    }
    stubs
}

/// Shuffles and pairs `stubs`, splitting the result into an accepted edge
/// set and a recycle queue of self-loops/duplicates.
fn pair_stubs<R: Rng + ?Sized>(rng: &mut R, mut stubs: Vec<u32>) -> (EdgeSet, VecDeque<Edge>) {
    shuffle(rng, &mut stubs);
    let mut edges = EdgeSet::with_capacity(stubs.len() / 2);
    let mut recycle = VecDeque::new();
    for pair in stubs.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == b {
            recycle.push_back((a, b));
            continue;
        }
        let edge = order(a, b);
        if edges.contains(&edge) {
            recycle.push_back(edge);
        } else {
            edges.insert(edge);
        }
    }
    (edges, recycle)
}

/// Randomized-rounding degree split for one cluster: every vertex but the
/// heaviest gets `randround(wir)`; the heaviest is rounded down and bumped
/// by one exactly when that makes the cluster's internal-weight total even.
fn split_cluster_degree<R: Rng + ?Sized>(rng: &mut R, members: &[usize], wir: &[f64]) -> Vec<u32> {
    let (i_star, _) = wir
        .iter()
        .enumerate()
        .fold((0usize, f64::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) });

    let mut internal = vec![0u32; members.len()];
    let mut sum_others: u64 = 0;
    for (pos, &raw) in wir.iter().enumerate() {
        if pos == i_star {
            continue;
        }
        let rounded = randround(rng, raw);
        internal[pos] = rounded;
        sum_others += rounded as u64;
    }
    let base = wir[i_star].floor() as u32;
    internal[i_star] = if (sum_others + base as u64) % 2 != 0 {
        base + 1
    } else {
        base
    };
    internal
}

enum TaskOutcome {
    Cluster {
        edges: EdgeSet,
        unresolved: usize,
    },
    Background {
        edges: EdgeSet,
        collisions_after_pairing: usize,
        leftover_recycle: VecDeque<Edge>,
    },
}

/// Runs the configuration-model engine.
pub fn generate_cm(params: &Params, clusters: &[usize], seed: u64) -> Result<CmResult, AbcdError> {
    let n = params.n();
    let k = params.k();
    let (cluster_weight, total) = cluster_weights(&params.w, clusters, k);
    let xi = compute_xi(params, &cluster_weight, total)?;

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &c) in clusters.iter().enumerate() {
        members[c].push(i);
    }

    // Split each vertex's degree into an internal and a global share, per
    // cluster, in parallel, aggregating into one internal-weight vector
    // sequentially afterwards.
    let split_results: Vec<(usize, Vec<u32>)> = members
        .par_iter()
        .enumerate()
        .filter(|(_, idx)| !idx.is_empty())
        .map(|(c, idx)| {
            let mut rng = task_rng(seed, 1_000_000 + c as u64);
            let xic = xi.for_cluster(c);
            let wir: Vec<f64> = idx.iter().map(|&i| params.w[i] as f64 * (1.0 - xic)).collect();
            (c, split_cluster_degree(&mut rng, idx, &wir))
        })
        .collect();

    let mut w_internal = vec![0u32; n];
    for (c, internal) in split_results {
        for (pos, &v) in members[c].iter().enumerate() {
            w_internal[v] = internal[pos];
        }
    }
    let w_global: Vec<u32> = (0..n).map(|i| params.w[i] - w_internal[i]).collect();

    // Pair stubs and locally rewire, one task per cluster plus a
    // distinguished background task (id `k`).
    let outcomes: Vec<TaskOutcome> = (0..=k)
        .into_par_iter()
        .map(|task| {
            let mut rng = task_rng(seed, 2_000_000 + task as u64);
            if task < k {
                let idx = &members[task];
                let stubs = build_stubs(idx, |v| w_internal[v]);
                let stubs_len = stubs.len();
                let (mut edges, mut recycle) = pair_stubs(&mut rng, stubs);
                bounded_rewire(&mut rng, stubs_len, &mut edges, &mut recycle);
                TaskOutcome::Cluster {
                    edges,
                    unresolved: recycle.len(),
                }
            } else {
                let all: Vec<usize> = (0..n).collect();
                let stubs = build_stubs(&all, |v| w_global[v]);
                let stubs_len = stubs.len();
                let (mut edges, mut recycle) = pair_stubs(&mut rng, stubs);
                let collisions_after_pairing = recycle.len();
                bounded_rewire(&mut rng, stubs_len, &mut edges, &mut recycle);
                TaskOutcome::Background {
                    edges,
                    collisions_after_pairing,
                    leftover_recycle: recycle,
                }
            }
        })
        .collect();

    let mut cluster_edges: Vec<EdgeSet> = Vec::with_capacity(k);
    let mut unresolved_cluster_collisions = 0usize;
    let mut e0 = EdgeSet::new();
    let mut global_collisions = 0usize;
    let mut global_recycle: VecDeque<Edge> = VecDeque::new();
    for outcome in outcomes {
        match outcome {
            TaskOutcome::Cluster { edges, unresolved } => {
                unresolved_cluster_collisions += unresolved;
                cluster_edges.push(edges);
            }
            TaskOutcome::Background {
                edges,
                collisions_after_pairing,
                leftover_recycle,
            } => {
                e0 = edges;
                global_collisions = collisions_after_pairing;
                global_recycle = leftover_recycle;
            }
        }
    }

    // Fold cross-set duplicates into the global recycle queue, then rewire
    // within the background set alone.
    let conflicts: Vec<Edge> = cluster_edges
        .par_iter()
        .flat_map(|cset| cset.iter().filter(|e| e0.contains(e)).copied().collect::<Vec<_>>())
        .collect();
    for edge in conflicts {
        e0.remove(&edge);
        global_recycle.push_back(edge);
    }

    let bg_stub_len: usize = w_global.iter().map(|&w| w as usize).sum();
    let mut reconcile_rng = task_rng(seed, 3_000_000);
    bounded_rewire(&mut reconcile_rng, bg_stub_len, &mut e0, &mut global_recycle);

    // Last-resort cross-cluster rewiring over every set at once.
    let mut all_sets = cluster_edges;
    all_sets.push(e0);
    let total_stub_len: usize = params.w.iter().map(|&w| w as usize).sum();
    let mut last_resort_rng = task_rng(seed, 4_000_000);
    last_resort_rewire(&mut last_resort_rng, &mut all_sets, &mut global_recycle, total_stub_len);

    let unresolved_global_collisions = global_recycle.len();
    let edges: Vec<Edge> = all_sets.into_iter().flat_map(EdgeSet::into_vec).collect();

    let anomalies = CmAnomalies {
        global_collisions,
        unresolved_cluster_collisions,
        unresolved_global_collisions,
    };
    if anomalies.global_collisions > 0 {
        tracing::warn!(count = anomalies.global_collisions, "global stub pairing collisions");
    }
    if anomalies.unresolved_cluster_collisions > 0 {
        tracing::warn!(
            count = anomalies.unresolved_cluster_collisions,
            "unresolved cluster collisions after local rewiring"
        );
    }
    if anomalies.unresolved_global_collisions > 0 {
        let fraction = 2.0 * anomalies.unresolved_global_collisions as f64 / total as f64;
        tracing::warn!(
            count = anomalies.unresolved_global_collisions,
            fraction,
            "unresolved global collisions after last-resort rewiring"
        );
    }

    Ok(CmResult { edges, anomalies })
}
