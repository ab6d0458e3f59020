//! Penalty (QUBO) encoding of the knapsack problem.
//!
//! Follows Lucas, "Ising formulations of many NP problems" (Frontiers in
//! Physics 2, 5, 2014). Binary slack bits `y_k` with weights `s_k` track the
//! total selected weight, and the model energy is
//!
//! ```text
//! H = lagrange * (sum_i w_i x_i - sum_k s_k y_k)^2 - sum_i c_i x_i
//! ```
//!
//! The slack weights can express every integer in `[0, C]`, so any
//! selection with an integral total weight up to the capacity has a slack
//! setting with zero penalty.

use qknap_model::{BinaryQuadraticModel, Variable};

use crate::error::KnapsackError;
use crate::items::Items;

/// A penalty model together with the parameters used to build it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedBqm {
    pub model: BinaryQuadraticModel,
    /// Penalty weight applied to the squared capacity residual
    pub lagrange: f64,
    /// Weight of each slack bit, indexed like `Variable::Slack`
    pub slack: Vec<f64>,
}

/// Slack weights for a capacity: `1, 2, 4, ..., 2^(M-1)` followed by
/// `C + 1 - 2^M`, where `M = floor(log2(C))`.
///
/// The last weight absorbs the remainder so the reachable sums are exactly
/// `[0, C]` rather than `[0, 2^(M+1) - 1]`.
pub fn slack_coefficients(capacity: f64) -> Result<Vec<f64>, KnapsackError> {
    if !capacity.is_finite() || capacity < 1.0 {
        return Err(KnapsackError::InvalidCapacity(capacity));
    }
    let m = capacity.log2().floor() as i32;

    let mut slack: Vec<f64> = (0..m).map(|k| 2f64.powi(k)).collect();
    slack.push(capacity + 1.0 - 2f64.powi(m));
    Ok(slack)
}

/// Build the penalty model for parallel cost/weight sequences
pub fn encode_bqm(costs: &[f64], weights: &[f64], capacity: f64) -> Result<EncodedBqm, KnapsackError> {
    build_bqm(&Items::new(costs, weights, capacity)?)
}

pub fn build_bqm(items: &Items) -> Result<EncodedBqm, KnapsackError> {
    let slack = slack_coefficients(items.capacity())?;
    let costs = items.costs();
    let weights = items.weights();

    // First guess suggested by Lucas; not guaranteed to keep the ground
    // state feasible for every cost distribution.
    let lagrange = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lagrange <= 0.0 {
        log::warn!(
            "Penalty weight {} is not positive; capacity violations will not be penalized",
            lagrange
        );
    }

    let mut bqm = BinaryQuadraticModel::new();

    // x_i x_i
    for (i, (&cost, &weight)) in costs.iter().zip(&weights).enumerate() {
        bqm.set_linear(Variable::Item(i), lagrange * weight * weight - cost);
    }

    // x_i x_j
    for i in 0..weights.len() {
        for j in (i + 1)..weights.len() {
            bqm.set_quadratic(
                Variable::Item(i),
                Variable::Item(j),
                2.0 * lagrange * weights[i] * weights[j],
            )?;
        }
    }

    // y_k y_k
    for (k, &s) in slack.iter().enumerate() {
        bqm.set_linear(Variable::Slack(k), lagrange * s * s);
    }

    // y_k y_l
    for k in 0..slack.len() {
        for l in (k + 1)..slack.len() {
            bqm.set_quadratic(
                Variable::Slack(k),
                Variable::Slack(l),
                2.0 * lagrange * slack[k] * slack[l],
            )?;
        }
    }

    // x_i y_k
    for (i, &weight) in weights.iter().enumerate() {
        for (k, &s) in slack.iter().enumerate() {
            bqm.set_quadratic(Variable::Item(i), Variable::Slack(k), -2.0 * lagrange * weight * s)?;
        }
    }

    log::debug!(
        "Built knapsack BQM: {} items, {} slack bits, {} interactions, lagrange {}",
        items.len(),
        slack.len(),
        bqm.num_interactions(),
        lagrange
    );

    Ok(EncodedBqm {
        model: bqm,
        lagrange,
        slack,
    })
}
