//! Stateless seeded sequence.
//!
//! There is no cursor: every decision point derives its own seed by adding a
//! small integer offset to a base seed, and `sample` is a pure function of that
//! seed. Golden layouts depend on the offsets chosen by each caller, so keep
//! them stable.

use campus_geom::Vec3;

/// Pseudo-random value in `[0, 1)` for `seed`.
#[inline]
pub fn sample(seed: i64) -> f64 {
    sample_f(seed as f64)
}

/// Same transform for a non-integer seed.
pub fn sample_f(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    let frac = x - x.floor();
    // sin(inf) is NaN; tiny negative x rounds `x - floor(x)` up to exactly 1.0
    if !frac.is_finite() || frac >= 1.0 {
        0.0
    } else {
        frac
    }
}

/// `floor(sample(seed) * n)`, always `< n` for `n > 0`.
#[inline]
pub fn pick(seed: i64, n: usize) -> usize {
    ((sample(seed) * n as f64) as usize).min(n.saturating_sub(1))
}

/// Per-building base seed derived from where the building stands.
#[inline]
pub fn building_seed(origin: Vec3) -> i64 {
    let mixed = (origin.x as f64) * 100.0 + (origin.z as f64) * 1000.0;
    (mixed.floor() as i64).abs()
}
