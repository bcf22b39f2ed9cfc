//! Bounded power-law samplers for the degree and community-size sequences
//! `abcd-core` consumes as already-validated input.

use rand::Rng;

use crate::error::CliError;

/// Draws one value from a power law with exponent `t` bounded to
/// `[min, max]`, via the inverse-CDF transform.
fn draw_bounded_power_law<R: Rng + ?Sized>(rng: &mut R, t: f64, min: f64, max: f64) -> f64 {
    let u: f64 = rng.random_range(0.0..1.0);
    if (t - 1.0).abs() < 1e-9 {
        min * (max / min).powf(u)
    } else {
        let exponent = 1.0 - t;
        let lo = min.powf(exponent);
        let hi = max.powf(exponent);
        (lo + u * (hi - lo)).powf(1.0 / exponent)
    }
}

/// Samples `n` vertex degrees from a bounded power law, retrying up to
/// `max_iter` times until the sum is even (a simple graph needs an even
/// total degree), then sorts descending.
pub fn sample_degrees<R: Rng + ?Sized>(
    rng: &mut R,
    t1: f64,
    d_min: u32,
    d_max: u32,
    d_max_iter: u32,
    n: u32,
) -> Result<Vec<u32>, CliError> {
    for _ in 0..d_max_iter.max(1) {
        let mut w: Vec<u32> = (0..n)
            .map(|_| draw_bounded_power_law(rng, t1, d_min as f64, d_max as f64).round() as u32)
            .map(|d| d.clamp(d_min, d_max))
            .collect();
        let sum: u64 = w.iter().map(|&x| x as u64).sum();
        if sum % 2 == 0 {
            w.sort_unstable_by(|a, b| b.cmp(a));
            return Ok(w);
        }
    }
    Err(CliError::SamplerExhausted(format!(
        "no even-sum degree sequence found in {d_max_iter} attempts"
    )))
}

/// Samples community sizes from a bounded power law until they sum exactly
/// to `n`, retrying up to `c_max_iter` times, then sorts descending.
pub fn sample_sizes<R: Rng + ?Sized>(
    rng: &mut R,
    t2: f64,
    c_min: u32,
    c_max: u32,
    c_max_iter: u32,
    n: u32,
) -> Result<Vec<u32>, CliError> {
    for _ in 0..c_max_iter.max(1) {
        let mut sizes = Vec::new();
        let mut total = 0u32;
        while total < n {
            let remaining = n - total;
            let draw = draw_bounded_power_law(rng, t2, c_min as f64, c_max as f64).round() as u32;
            let draw = draw.clamp(c_min, c_max).min(remaining);
            if draw == 0 {
                break;
            }
            sizes.push(draw);
            total += draw;
        }
        if total == n && sizes.iter().all(|&s| s >= c_min) {
            sizes.sort_unstable_by(|a, b| b.cmp(a));
            return Ok(sizes);
        }
    }
    Err(CliError::SamplerExhausted(format!(
        "no community-size sequence summing to {n} found in {c_max_iter} attempts"
    )))
}
