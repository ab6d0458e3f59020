use std::collections::{BTreeMap, BTreeSet};

use crate::ModelError;
use crate::variable::{Assignment, Variable};

/// Binary quadratic model: an unconstrained energy function over 0/1 variables
///
/// Interactions are stored once per unordered pair, under the smaller
/// variable, so `quadratic(u, v) == quadratic(v, u)` always holds.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryQuadraticModel {
    /// Linear (diagonal) coefficients
    pub linear: BTreeMap<Variable, f64>,
    /// Upper-triangular interaction coefficients, `low -> high -> bias`
    pub quadratic: BTreeMap<Variable, BTreeMap<Variable, f64>>,
    /// Constant energy term
    pub offset: f64,
}

impl BinaryQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_linear(&mut self, v: Variable, bias: f64) {
        self.linear.insert(v, bias);
    }

    pub fn add_linear(&mut self, v: Variable, bias: f64) {
        *self.linear.entry(v).or_insert(0.0) += bias;
    }

    /// Set the interaction between `u` and `v`, replacing any previous value
    pub fn set_quadratic(&mut self, u: Variable, v: Variable, bias: f64) -> Result<(), ModelError> {
        if u == v {
            return Err(ModelError::SelfInteraction(u));
        }
        let (low, high) = if u < v { (u, v) } else { (v, u) };
        self.quadratic.entry(low).or_default().insert(high, bias);
        Ok(())
    }

    pub fn linear(&self, v: Variable) -> Option<f64> {
        self.linear.get(&v).copied()
    }

    pub fn quadratic(&self, u: Variable, v: Variable) -> Option<f64> {
        let (low, high) = if u < v { (u, v) } else { (v, u) };
        self.quadratic.get(&low).and_then(|row| row.get(&high)).copied()
    }

    /// Iterate interactions as `(low, high, bias)`
    pub fn interactions(&self) -> impl Iterator<Item = (Variable, Variable, f64)> + '_ {
        self.quadratic
            .iter()
            .flat_map(|(&u, row)| row.iter().map(move |(&v, &bias)| (u, v, bias)))
    }

    /// Every variable referenced by a linear or quadratic term, sorted
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: BTreeSet<Variable> = self.linear.keys().copied().collect();
        for (u, v, _) in self.interactions() {
            vars.insert(u);
            vars.insert(v);
        }
        vars.into_iter().collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    pub fn num_interactions(&self) -> usize {
        self.quadratic.values().map(BTreeMap::len).sum()
    }

    /// Energy of an assignment; variables missing from it count as 0
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        let on = |v: &Variable| assignment.get(v).copied().unwrap_or(false);

        let mut energy = self.offset;
        for (v, bias) in &self.linear {
            if on(v) {
                energy += bias;
            }
        }
        for (u, v, bias) in self.interactions() {
            if on(&u) && on(&v) {
                energy += bias;
            }
        }
        energy
    }

    /// Largest absolute linear or quadratic coefficient
    pub fn max_abs_bias(&self) -> f64 {
        self.linear
            .values()
            .copied()
            .chain(self.interactions().map(|(_, _, b)| b))
            .fold(0.0, |acc, b| acc.max(b.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(on: &[Variable], all: &[Variable]) -> Assignment {
        all.iter().map(|v| (*v, on.contains(v))).collect()
    }

    #[test]
    fn test_quadratic_is_symmetric() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.set_quadratic(Variable::Slack(1), Variable::Item(0), 3.0).unwrap();

        assert_eq!(bqm.quadratic(Variable::Item(0), Variable::Slack(1)), Some(3.0));
        assert_eq!(bqm.quadratic(Variable::Slack(1), Variable::Item(0)), Some(3.0));
        assert_eq!(bqm.num_interactions(), 1);

        // Writing the reversed pair replaces rather than duplicates
        bqm.set_quadratic(Variable::Item(0), Variable::Slack(1), -1.0).unwrap();
        assert_eq!(bqm.num_interactions(), 1);
        assert_eq!(bqm.quadratic(Variable::Slack(1), Variable::Item(0)), Some(-1.0));
    }

    #[test]
    fn test_self_interaction_rejected() {
        let mut bqm = BinaryQuadraticModel::new();
        let err = bqm.set_quadratic(Variable::Item(2), Variable::Item(2), 1.0);
        assert!(matches!(err, Err(ModelError::SelfInteraction(Variable::Item(2)))));
        assert_eq!(bqm.num_interactions(), 0);
    }

    #[test]
    fn test_variables_include_quadratic_only() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.set_linear(Variable::Item(1), 1.0);
        bqm.set_quadratic(Variable::Item(0), Variable::Slack(0), 2.0).unwrap();

        assert_eq!(
            bqm.variables(),
            vec![Variable::Item(0), Variable::Item(1), Variable::Slack(0)]
        );
        assert_eq!(bqm.num_variables(), 3);
    }

    #[test]
    fn test_energy() {
        // E = 1 - 2a + 3b + 4ab
        let a = Variable::Item(0);
        let b = Variable::Item(1);
        let mut bqm = BinaryQuadraticModel::new();
        bqm.offset = 1.0;
        bqm.set_linear(a, -2.0);
        bqm.set_linear(b, 3.0);
        bqm.set_quadratic(a, b, 4.0).unwrap();

        let all = [a, b];
        assert_eq!(bqm.energy(&assignment(&[], &all)), 1.0);
        assert_eq!(bqm.energy(&assignment(&[a], &all)), -1.0);
        assert_eq!(bqm.energy(&assignment(&[b], &all)), 4.0);
        assert_eq!(bqm.energy(&assignment(&[a, b], &all)), 6.0);

        // Missing variables are treated as 0
        assert_eq!(bqm.energy(&Assignment::new()), 1.0);
    }

    #[test]
    fn test_add_linear_accumulates() {
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_linear(Variable::Slack(0), 1.5);
        bqm.add_linear(Variable::Slack(0), 2.0);
        assert_eq!(bqm.linear(Variable::Slack(0)), Some(3.5));
        assert_eq!(bqm.max_abs_bias(), 3.5);
    }
}
