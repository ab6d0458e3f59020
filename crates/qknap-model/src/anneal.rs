use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::dense::DenseModel;
use crate::error::SamplerError;
use crate::sample::{Sample, SampleSet};
use crate::sampler::{Model, Sampler};

/// Upper bound on `num_reads`; every read is kept in memory
const MAX_NUM_READS: usize = 1_000_000;
/// Upper bound on `num_sweeps`; the schedule holds one beta per sweep
const MAX_NUM_SWEEPS: usize = 10_000_000;

/// Single-flip Metropolis annealer with a geometric inverse-temperature schedule.
///
/// Constrained models are annealed on `objective + penalty * violation`, but
/// the returned samples carry the plain objective as their energy and the
/// real feasibility of the final state.
pub struct SimulatedAnnealingSampler {
    /// Independent annealing runs, one sample each
    num_reads: usize,
    /// Full passes over all variables per run
    num_sweeps: usize,
    /// `(hot, cold)` inverse temperatures; derived from the model when unset
    beta_range: Option<(f64, f64)>,
    /// Fixed seed for reproducible runs
    seed: Option<u64>,
}

impl Default for SimulatedAnnealingSampler {
    fn default() -> Self {
        Self {
            num_reads: 10,
            num_sweeps: 1000,
            beta_range: None,
            seed: None,
        }
    }
}

impl SimulatedAnnealingSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    pub fn with_num_sweeps(mut self, num_sweeps: usize) -> Self {
        self.num_sweeps = num_sweeps;
        self
    }

    pub fn with_beta_range(mut self, hot: f64, cold: f64) -> Self {
        self.beta_range = Some((hot, cold));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), SamplerError> {
        if self.num_reads == 0 {
            return Err(SamplerError::InvalidParameter("num_reads must be positive".to_string()));
        }
        if self.num_reads > MAX_NUM_READS {
            return Err(SamplerError::InvalidParameter(format!(
                "num_reads must be at most {}, got {}",
                MAX_NUM_READS, self.num_reads
            )));
        }
        if self.num_sweeps == 0 {
            return Err(SamplerError::InvalidParameter("num_sweeps must be positive".to_string()));
        }
        if self.num_sweeps > MAX_NUM_SWEEPS {
            return Err(SamplerError::InvalidParameter(format!(
                "num_sweeps must be at most {}, got {}",
                MAX_NUM_SWEEPS, self.num_sweeps
            )));
        }
        if let Some((hot, cold)) = self.beta_range {
            if !(hot > 0.0 && cold >= hot && cold.is_finite()) {
                return Err(SamplerError::InvalidParameter(format!(
                    "beta range must satisfy 0 < hot <= cold, got ({}, {})",
                    hot, cold
                )));
            }
        }
        Ok(())
    }

    /// Weight applied to constraint violation while annealing a CQM
    fn penalty_weight(dense: &DenseModel) -> f64 {
        if !dense.constrained {
            return 0.0;
        }
        let linear: f64 = dense.linear.iter().map(|b| b.abs()).sum();
        // Every interaction is listed twice in the adjacency
        let quadratic: f64 = dense.neighbors.iter().flatten().map(|(_, b)| b.abs()).sum::<f64>() / 2.0;
        1.0 + linear + quadratic
    }

    /// Inverse temperatures that make the largest single flip likely to be
    /// accepted at the start and the smallest unlikely at the end
    fn default_beta_range(dense: &DenseModel, penalty: f64) -> (f64, f64) {
        let mut max_delta: f64 = 0.0;
        let mut min_delta = f64::INFINITY;
        for i in 0..dense.len() {
            let mut field = dense.linear[i].abs();
            if field > 0.0 {
                min_delta = min_delta.min(field);
            }
            for &(_, b) in &dense.neighbors[i] {
                field += b.abs();
                if b != 0.0 {
                    min_delta = min_delta.min(b.abs());
                }
            }
            for &(_, coef) in &dense.memberships[i] {
                field += penalty * coef.abs();
            }
            max_delta = max_delta.max(field);
        }

        if max_delta == 0.0 || !min_delta.is_finite() {
            return (1.0, 1.0);
        }
        let hot = 2f64.ln() / max_delta;
        let cold = (100f64.ln() / min_delta).max(hot);
        (hot, cold)
    }

    fn schedule(&self, hot: f64, cold: f64) -> Vec<f64> {
        if self.num_sweeps == 1 {
            return vec![cold];
        }
        let ratio = (cold / hot).powf(1.0 / (self.num_sweeps - 1) as f64);
        (0..self.num_sweeps).map(|k| hot * ratio.powi(k as i32)).collect()
    }

    fn anneal(&self, dense: &DenseModel, betas: &[f64], penalty: f64, rng: &mut SmallRng) -> Sample {
        let n = dense.len();
        let mut state: Vec<bool> = (0..n).map(|_| rng.r#gen()).collect();
        let mut lhs = dense.lhs_values(&state);

        for &beta in betas {
            for i in 0..n {
                let mut delta = dense.flip_delta(&state, i);
                if penalty > 0.0 {
                    let sign = if state[i] { -1.0 } else { 1.0 };
                    for &(c, coef) in &dense.memberships[i] {
                        let constraint = &dense.constraints[c];
                        let before = constraint.violation_at(lhs[c]);
                        let after = constraint.violation_at(lhs[c] + sign * coef);
                        delta += penalty * (after - before);
                    }
                }

                if delta <= 0.0 || rng.r#gen::<f64>() < (-beta * delta).exp() {
                    let sign = if state[i] { -1.0 } else { 1.0 };
                    for &(c, coef) in &dense.memberships[i] {
                        lhs[c] += sign * coef;
                    }
                    state[i] = !state[i];
                }
            }
        }

        dense.to_sample(&state)
    }
}

impl Sampler for SimulatedAnnealingSampler {
    fn sample(&self, model: &Model) -> Result<SampleSet, SamplerError> {
        self.validate()?;
        let dense = DenseModel::new(model);
        let penalty = Self::penalty_weight(&dense);
        let (hot, cold) = self
            .beta_range
            .unwrap_or_else(|| Self::default_beta_range(&dense, penalty));
        let betas = self.schedule(hot, cold);

        log::debug!(
            "Annealing {} variables: {} reads x {} sweeps, beta {:.3e}..{:.3e}",
            dense.len(),
            self.num_reads,
            self.num_sweeps,
            hot,
            cold
        );

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok((0..self.num_reads)
            .map(|_| self.anneal(&dense, &betas, penalty, &mut rng))
            .collect())
    }
}
