//! Index-based view of a model shared by the reference samplers.

use std::collections::HashMap;

use crate::bqm::BinaryQuadraticModel;
use crate::cqm::{FEASIBILITY_TOLERANCE, Sense};
use crate::sample::Sample;
use crate::sampler::Model;
use crate::variable::{Assignment, Variable};

pub(crate) struct DenseConstraint {
    pub terms: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl DenseConstraint {
    pub fn violation_at(&self, lhs: f64) -> f64 {
        let amount = match self.sense {
            Sense::Le => lhs - self.rhs,
            Sense::Ge => self.rhs - lhs,
            Sense::Eq => (lhs - self.rhs).abs(),
        };
        if amount > FEASIBILITY_TOLERANCE { amount } else { 0.0 }
    }
}

pub(crate) struct DenseModel {
    pub variables: Vec<Variable>,
    pub offset: f64,
    pub linear: Vec<f64>,
    /// Symmetric adjacency: every interaction appears under both endpoints
    pub neighbors: Vec<Vec<(usize, f64)>>,
    pub constraints: Vec<DenseConstraint>,
    /// `(constraint, coefficient)` pairs each variable takes part in
    pub memberships: Vec<Vec<(usize, f64)>>,
    pub constrained: bool,
}

impl DenseModel {
    pub fn new(model: &Model) -> Self {
        let variables = model.variables();
        let position: HashMap<Variable, usize> =
            variables.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        let n = variables.len();

        let objective: &BinaryQuadraticModel = match model {
            Model::Bqm(bqm) => bqm,
            Model::Cqm(cqm) => &cqm.objective,
        };

        let mut linear = vec![0.0; n];
        for (v, bias) in &objective.linear {
            linear[position[v]] += bias;
        }

        let mut neighbors = vec![Vec::new(); n];
        for (u, v, bias) in objective.interactions() {
            let (i, j) = (position[&u], position[&v]);
            neighbors[i].push((j, bias));
            neighbors[j].push((i, bias));
        }

        let mut constraints = Vec::new();
        let mut memberships = vec![Vec::new(); n];
        if let Model::Cqm(cqm) = model {
            for (c, constraint) in cqm.constraints.iter().enumerate() {
                let terms: Vec<(usize, f64)> = constraint
                    .lhs
                    .terms
                    .iter()
                    .map(|(v, coef)| (position[v], *coef))
                    .collect();
                for &(i, coef) in &terms {
                    memberships[i].push((c, coef));
                }
                constraints.push(DenseConstraint {
                    terms,
                    sense: constraint.sense,
                    rhs: constraint.rhs,
                });
            }
        }

        Self {
            variables,
            offset: objective.offset,
            linear,
            neighbors,
            constraints,
            memberships,
            constrained: matches!(model, Model::Cqm(_)),
        }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn energy(&self, state: &[bool]) -> f64 {
        let mut energy = self.offset;
        for i in 0..state.len() {
            if !state[i] {
                continue;
            }
            energy += self.linear[i];
            for &(j, bias) in &self.neighbors[i] {
                // Count each interaction once
                if j > i && state[j] {
                    energy += bias;
                }
            }
        }
        energy
    }

    /// Objective change from flipping variable `i`
    pub fn flip_delta(&self, state: &[bool], i: usize) -> f64 {
        let mut field = self.linear[i];
        for &(j, bias) in &self.neighbors[i] {
            if state[j] {
                field += bias;
            }
        }
        if state[i] { -field } else { field }
    }

    pub fn lhs_values(&self, state: &[bool]) -> Vec<f64> {
        self.constraints
            .iter()
            .map(|c| c.terms.iter().filter(|(i, _)| state[*i]).map(|(_, coef)| coef).sum::<f64>())
            .collect()
    }

    pub fn is_feasible(&self, state: &[bool]) -> bool {
        self.lhs_values(state)
            .iter()
            .zip(&self.constraints)
            .all(|(lhs, c)| c.violation_at(*lhs) == 0.0)
    }

    /// Build a sample, flagging feasibility only for constrained models
    pub fn to_sample(&self, state: &[bool]) -> Sample {
        let assignment: Assignment = self
            .variables
            .iter()
            .copied()
            .zip(state.iter().copied())
            .collect();
        let energy = self.energy(state);
        if self.constrained {
            Sample::with_feasibility(assignment, energy, self.is_feasible(state))
        } else {
            Sample::new(assignment, energy)
        }
    }
}
