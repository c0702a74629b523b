//! Small box-bounded minimizer used for portion sizing.
//!
//! Projected gradient descent with a backtracking line search, run under a
//! quadratic penalty for one linear band constraint (`lower <= c.x <=
//! upper`). The penalty weight escalates over a few outer rounds, which is
//! enough for the low-dimensional, well-scaled problems the portion
//! optimizer produces. Deterministic and allocation-light; non-finite
//! numbers abort the solve instead of propagating.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Total gradient steps across all penalty rounds.
    pub max_iterations: usize,
    /// Outer penalty escalations.
    pub penalty_rounds: usize,
    pub initial_penalty: f32,
    pub penalty_growth: f32,
    /// Step-norm threshold that ends a penalty round early.
    pub step_tolerance: f32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            penalty_rounds: 5,
            initial_penalty: 10.0,
            penalty_growth: 10.0,
            step_tolerance: 1e-4,
        }
    }
}

/// Linear band constraint: `lower <= coefficients . x <= upper`.
#[derive(Debug, Clone)]
pub struct BandConstraint {
    pub coefficients: Vec<f32>,
    pub lower: f32,
    pub upper: f32,
}

impl BandConstraint {
    pub fn value(&self, x: &[f32]) -> f32 {
        self.coefficients.iter().zip(x).map(|(c, xi)| c * xi).sum()
    }

    fn denom(&self) -> f32 {
        self.upper.abs().max(1.0)
    }

    /// Relative distance outside the band; 0 inside it.
    pub fn violation(&self, x: &[f32]) -> f32 {
        let value = self.value(x);
        if value < self.lower {
            (self.lower - value) / self.denom()
        } else if value > self.upper {
            (value - self.upper) / self.denom()
        } else {
            0.0
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SolveFailure {
    /// The objective or a gradient stopped being a real number.
    NonFinite,
}

impl fmt::Display for SolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveFailure::NonFinite => write!(f, "Solve produced a non-finite value"),
        }
    }
}

impl Error for SolveFailure {}

fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

const LINE_SEARCH_STEPS: usize = 40;

/// Minimizes `objective` over the box `bounds` while pushing `band` toward
/// feasibility. Returns the best point found; the caller decides whether
/// the band is satisfied tightly enough.
pub fn minimize_with_band<F, G>(
    objective: F,
    gradient: G,
    bounds: &[(f32, f32)],
    band: &BandConstraint,
    initial: &[f32],
    options: &SolveOptions,
) -> Result<Vec<f32>, SolveFailure>
where
    F: Fn(&[f32]) -> f32,
    G: Fn(&[f32], &mut [f32]),
{
    let n = initial.len();
    let mut x: Vec<f32> = initial
        .iter()
        .enumerate()
        .map(|(i, &v)| clamp(v, bounds[i].0, bounds[i].1))
        .collect();

    let mut grad = vec![0.0_f32; n];
    let mut candidate = vec![0.0_f32; n];
    let mut used = 0_usize;

    'rounds: for round in 0..options.penalty_rounds {
        let mu = options.initial_penalty * options.penalty_growth.powi(round as i32);
        let penalized = |point: &[f32]| {
            let v = band.violation(point);
            objective(point) + mu * v * v
        };

        loop {
            if used >= options.max_iterations {
                break 'rounds;
            }
            used += 1;

            let f0 = penalized(&x);
            if !f0.is_finite() {
                return Err(SolveFailure::NonFinite);
            }

            gradient(&x, &mut grad);
            let violation = band.violation(&x);
            if violation > 0.0 {
                let sign = if band.value(&x) > band.upper { 1.0 } else { -1.0 };
                let scale = 2.0 * mu * violation * sign / band.denom();
                for (g, c) in grad.iter_mut().zip(&band.coefficients) {
                    *g += scale * c;
                }
            }
            if grad.iter().any(|g| !g.is_finite()) {
                return Err(SolveFailure::NonFinite);
            }

            let mut alpha = 1.0_f32;
            let mut improved = false;
            for _ in 0..LINE_SEARCH_STEPS {
                for i in 0..n {
                    candidate[i] = clamp(x[i] - alpha * grad[i], bounds[i].0, bounds[i].1);
                }
                let f1 = penalized(&candidate);
                if !f1.is_finite() {
                    return Err(SolveFailure::NonFinite);
                }
                if f1 < f0 {
                    improved = true;
                    break;
                }
                alpha *= 0.5;
            }
            if !improved {
                // Stationary for this penalty weight.
                break;
            }

            let step_norm: f32 = x
                .iter()
                .zip(&candidate)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>()
                .sqrt();
            x.copy_from_slice(&candidate);
            if step_norm < options.step_tolerance {
                break;
            }
        }
    }

    Ok(x)
}
