use crate::dense::DenseModel;
use crate::error::SamplerError;
use crate::sample::SampleSet;
use crate::sampler::{Model, Sampler};

/// Brute-force sampler that evaluates every assignment of the model
pub struct ExactSolver {
    /// Number of lowest-energy samples to keep (per feasibility class for CQMs)
    num_reads: usize,
    /// Refuse models larger than this
    max_variables: usize,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self {
            num_reads: 10,
            max_variables: 24,
        }
    }
}

/// Keeps the `capacity` lowest-energy `(energy, mask)` pairs seen so far
struct Best {
    capacity: usize,
    entries: Vec<(f64, u64)>,
}

impl Best {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn offer(&mut self, energy: f64, mask: u64) {
        if self.entries.len() >= self.capacity {
            if let Some(worst) = self.entries.last() {
                if energy >= worst.0 {
                    return;
                }
            }
        }
        // Insert after equal energies so earlier masks win ties
        let at = self.entries.partition_point(|(e, _)| *e <= energy);
        self.entries.insert(at, (energy, mask));
        self.entries.truncate(self.capacity);
    }
}

impl ExactSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    pub fn with_max_variables(mut self, max: usize) -> Self {
        self.max_variables = max;
        self
    }

    fn enumerate(&self, dense: &DenseModel) -> SampleSet {
        let n = dense.len();
        // No class can hold more than the 2^n assignments that exist
        let keep = usize::try_from(1u64 << n).map_or(self.num_reads, |total| self.num_reads.min(total));
        let mut feasible = Best::new(keep);
        let mut infeasible = Best::new(keep);
        let mut state = vec![false; n];

        for mask in 0..(1u64 << n) {
            for (i, bit) in state.iter_mut().enumerate() {
                *bit = (mask >> i) & 1 == 1;
            }
            let energy = dense.energy(&state);
            if !dense.constrained || dense.is_feasible(&state) {
                feasible.offer(energy, mask);
            } else {
                infeasible.offer(energy, mask);
            }
        }

        feasible
            .entries
            .into_iter()
            .chain(infeasible.entries)
            .map(|(_, mask)| {
                let state: Vec<bool> = (0..n).map(|i| (mask >> i) & 1 == 1).collect();
                dense.to_sample(&state)
            })
            .collect()
    }
}

impl Sampler for ExactSolver {
    fn sample(&self, model: &Model) -> Result<SampleSet, SamplerError> {
        if self.num_reads == 0 {
            return Err(SamplerError::InvalidParameter("num_reads must be positive".to_string()));
        }
        // A u64 mask bounds the search space regardless of configuration
        let limit = self.max_variables.min(63);
        let dense = DenseModel::new(model);
        if dense.len() > limit {
            return Err(SamplerError::TooManyVariables {
                found: dense.len(),
                limit,
            });
        }

        log::debug!(
            "Exact enumeration over {} variables ({} assignments)",
            dense.len(),
            1u64 << dense.len()
        );
        Ok(self.enumerate(&dense))
    }
}
