//! Validated, immutable generator parameters.

use crate::error::AbcdError;

/// Selects which quantity drives the inter/intra-cluster split.
///
/// Exactly one of `mu`/`xi` is ever supplied; the enum makes that XOR a
/// property of the type rather than a runtime check `Params::new` has to
/// perform. The runtime "both or neither given" check still happens, just
/// one layer up — wherever raw optional inputs (a TOML config, a pair of
/// CLI flags) are translated into a `Mixing` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mixing {
    /// Mixing parameter: expected fraction of a vertex's edges leaving its
    /// community.
    Mu(f64),
    /// Background-graph fraction: fraction of edges drawn from the
    /// background (inter-community) graph.
    Xi(f64),
}

impl Mixing {
    fn value(self) -> f64 {
        match self {
            Mixing::Mu(v) | Mixing::Xi(v) => v,
        }
    }

    fn in_unit_interval(self) -> bool {
        (0.0..=1.0).contains(&self.value())
    }
}

/// Validated, immutable generator parameters.
///
/// Construction sorts `w` and `s` descending and rejects any mutually
/// inconsistent combination of fields with `AbcdError::ConfigInconsistent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Vertex degrees, sorted descending. Length `n`.
    pub w: Vec<u32>,
    /// Community sizes, sorted descending. Length `k`, `sum(s) == n`.
    pub s: Vec<u32>,
    /// Mixing parameter or background fraction (exactly one).
    pub mixing: Mixing,
    /// Selects the Chung-Lu engine (`true`) or the configuration-model
    /// engine (`false`).
    pub is_cl: bool,
    /// Enforces the mixing constraint per cluster rather than globally.
    pub is_local: bool,
}

impl Params {
    /// Validates and constructs a `Params`.
    ///
    /// `w` and `s` are sorted descending if they are not already.
    pub fn new(
        mut w: Vec<u32>,
        mut s: Vec<u32>,
        mixing: Mixing,
        is_cl: bool,
        is_local: bool,
    ) -> Result<Self, AbcdError> {
        w.sort_unstable_by(|a, b| b.cmp(a));
        s.sort_unstable_by(|a, b| b.cmp(a));

        if w.is_empty() {
            return Err(AbcdError::config_inconsistent("degree sequence is empty"));
        }
        if s.is_empty() {
            return Err(AbcdError::config_inconsistent(
                "community-size sequence is empty",
            ));
        }

        let n = w.len() as u64;
        let sum_s: u64 = s.iter().map(|&x| x as u64).sum();
        if sum_s != n {
            return Err(AbcdError::config_inconsistent(format!(
                "sum(s) = {sum_s} does not match n = {n}"
            )));
        }

        if matches!(mixing, Mixing::Xi(_)) && is_local {
            return Err(AbcdError::config_inconsistent(
                "xi cannot be combined with is_local",
            ));
        }
        if !mixing.in_unit_interval() {
            return Err(AbcdError::config_inconsistent(format!(
                "mixing value {:?} is outside [0, 1]",
                mixing
            )));
        }

        let sum_w: u64 = w.iter().map(|&x| x as u64).sum();
        if sum_w % 2 != 0 {
            return Err(AbcdError::config_inconsistent(
                "sum(w) must be even for a simple graph to exist",
            ));
        }

        Ok(Params {
            w,
            s,
            mixing,
            is_cl,
            is_local,
        })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.w.len()
    }

    /// Number of communities.
    pub fn k(&self) -> usize {
        self.s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending() {
        let p = Params::new(vec![1, 3, 2], vec![2, 1], Mixing::Mu(0.1), true, false).unwrap();
        assert_eq!(p.w, vec![3, 2, 1]);
    }

    #[test]
    fn rejects_sum_mismatch() {
        let err = Params::new(
            vec![1, 1, 1, 1, 1],
            vec![3, 3],
            Mixing::Mu(0.1),
            true,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, AbcdError::ConfigInconsistent(_)));
    }

    #[test]
    fn rejects_xi_with_is_local() {
        let err = Params::new(vec![2, 2], vec![2], Mixing::Xi(0.1), true, true).unwrap_err();
        assert!(matches!(err, AbcdError::ConfigInconsistent(_)));
    }

    #[test]
    fn rejects_out_of_range_mixing() {
        let err = Params::new(vec![2, 2], vec![2], Mixing::Mu(1.5), true, false).unwrap_err();
        assert!(matches!(err, AbcdError::ConfigInconsistent(_)));
    }

    #[test]
    fn rejects_odd_degree_sum() {
        let err = Params::new(vec![1, 2], vec![2], Mixing::Mu(0.1), true, false).unwrap_err();
        assert!(matches!(err, AbcdError::ConfigInconsistent(_)));
    }
}
