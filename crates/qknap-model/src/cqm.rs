use std::collections::{BTreeMap, BTreeSet};

use crate::ModelError;
use crate::bqm::BinaryQuadraticModel;
use crate::variable::{Assignment, Variable};

/// Absolute tolerance used when checking constraint satisfaction
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Sum of `coefficient * variable` terms
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearExpression {
    pub terms: BTreeMap<Variable, f64>,
}

impl LinearExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, v: Variable, coefficient: f64) {
        *self.terms.entry(v).or_insert(0.0) += coefficient;
    }

    pub fn coefficient(&self, v: Variable) -> Option<f64> {
        self.terms.get(&v).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment.get(*v).copied().unwrap_or(false))
            .map(|(_, c)| c)
            .sum()
    }
}

impl FromIterator<(Variable, f64)> for LinearExpression {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpression::new();
        for (v, c) in iter {
            expr.add_term(v, c);
        }
        expr
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Name/label for the constraint (unique within a model)
    pub label: String,
    /// Left-hand side
    pub lhs: LinearExpression,
    /// Comparison operator
    pub sense: Sense,
    /// Right-hand side value
    pub rhs: f64,
}

impl Constraint {
    /// How far the assignment is from satisfying the constraint (0 when satisfied)
    pub fn violation(&self, assignment: &Assignment) -> f64 {
        let lhs = self.lhs.evaluate(assignment);
        let amount = match self.sense {
            Sense::Le => lhs - self.rhs,
            Sense::Ge => self.rhs - lhs,
            Sense::Eq => (lhs - self.rhs).abs(),
        };
        if amount > FEASIBILITY_TOLERANCE { amount } else { 0.0 }
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.violation(assignment) == 0.0
    }
}

/// Objective plus explicit constraints, handled natively by the sampler
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstrainedQuadraticModel {
    pub objective: BinaryQuadraticModel,
    pub constraints: Vec<Constraint>,
}

impl ConstrainedQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_objective(&mut self, objective: BinaryQuadraticModel) {
        self.objective = objective;
    }

    pub fn add_constraint(
        &mut self,
        label: impl Into<String>,
        lhs: LinearExpression,
        sense: Sense,
        rhs: f64,
    ) -> Result<(), ModelError> {
        let label = label.into();
        if self.constraint(&label).is_some() {
            return Err(ModelError::DuplicateLabel(label));
        }
        self.constraints.push(Constraint { label, lhs, sense, rhs });
        Ok(())
    }

    pub fn constraint(&self, label: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.label == label)
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Every variable in the objective or any constraint, sorted
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: BTreeSet<Variable> = self.objective.variables().into_iter().collect();
        for c in &self.constraints {
            vars.extend(c.lhs.terms.keys().copied());
        }
        vars.into_iter().collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    /// Objective value only; constraints never contribute to the energy
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        self.objective.energy(assignment)
    }

    /// Sum of all constraint violations
    pub fn violation(&self, assignment: &Assignment) -> f64 {
        self.constraints.iter().map(|c| c.violation(assignment)).sum()
    }

    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_model() -> ConstrainedQuadraticModel {
        let mut objective = BinaryQuadraticModel::new();
        objective.set_linear(Variable::Item(0), -10.0);
        objective.set_linear(Variable::Item(1), -1.0);

        let lhs: LinearExpression = [(Variable::Item(0), 5.0), (Variable::Item(1), 7.0)]
            .into_iter()
            .collect();

        let mut cqm = ConstrainedQuadraticModel::new();
        cqm.set_objective(objective);
        cqm.add_constraint("capacity", lhs, Sense::Le, 10.0).unwrap();
        cqm
    }

    fn assignment(x0: bool, x1: bool) -> Assignment {
        [(Variable::Item(0), x0), (Variable::Item(1), x1)].into_iter().collect()
    }

    #[test]
    fn test_energy_is_objective_only() {
        let cqm = capacity_model();
        // Infeasible (weight 12 > 10) but energy carries no penalty
        assert_eq!(cqm.energy(&assignment(true, true)), -11.0);
        assert_eq!(cqm.energy(&assignment(true, false)), -10.0);
    }

    #[test]
    fn test_feasibility() {
        let cqm = capacity_model();
        assert!(cqm.is_feasible(&assignment(false, false)));
        assert!(cqm.is_feasible(&assignment(true, false)));
        assert!(cqm.is_feasible(&assignment(false, true)));
        assert!(!cqm.is_feasible(&assignment(true, true)));
        assert!((cqm.violation(&assignment(true, true)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_is_feasible() {
        let mut cqm = ConstrainedQuadraticModel::new();
        let lhs: LinearExpression = [(Variable::Item(0), 10.0)].into_iter().collect();
        cqm.add_constraint("capacity", lhs, Sense::Le, 10.0).unwrap();
        assert!(cqm.is_feasible(&[(Variable::Item(0), true)].into_iter().collect()));
    }

    #[test]
    fn test_senses() {
        let lhs: LinearExpression = [(Variable::Item(0), 3.0)].into_iter().collect();
        let on: Assignment = [(Variable::Item(0), true)].into_iter().collect();

        let ge = Constraint { label: "ge".into(), lhs: lhs.clone(), sense: Sense::Ge, rhs: 4.0 };
        assert!((ge.violation(&on) - 1.0).abs() < 1e-12);

        let eq = Constraint { label: "eq".into(), lhs, sense: Sense::Eq, rhs: 3.0 };
        assert!(eq.is_satisfied(&on));
        assert!(!eq.is_satisfied(&Assignment::new()));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut cqm = capacity_model();
        let err = cqm.add_constraint("capacity", LinearExpression::new(), Sense::Le, 1.0);
        assert!(matches!(err, Err(ModelError::DuplicateLabel(ref l)) if l == "capacity"));
        assert_eq!(cqm.num_constraints(), 1);
    }

    #[test]
    fn test_variables() {
        let cqm = capacity_model();
        assert_eq!(cqm.variables(), vec![Variable::Item(0), Variable::Item(1)]);
        assert_eq!(cqm.num_variables(), 2);
    }
}
