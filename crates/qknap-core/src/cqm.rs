use qknap_model::{BinaryQuadraticModel, ConstrainedQuadraticModel, Constraint, LinearExpression, Sense, Variable};

use crate::error::KnapsackError;
use crate::items::Items;

/// Label of the single weight constraint in a knapsack CQM
pub const CAPACITY_LABEL: &str = "capacity";

/// Build the constrained model: minimize `-sum c_i x_i` subject to
/// `sum w_i x_i <= C`
pub fn encode_cqm(costs: &[f64], weights: &[f64], capacity: f64) -> Result<ConstrainedQuadraticModel, KnapsackError> {
    build_cqm(&Items::new(costs, weights, capacity)?)
}

pub fn build_cqm(items: &Items) -> Result<ConstrainedQuadraticModel, KnapsackError> {
    let mut objective = BinaryQuadraticModel::new();
    let mut lhs = LinearExpression::new();
    for (i, item) in items.iter().enumerate() {
        objective.set_linear(Variable::Item(i), -item.cost);
        lhs.add_term(Variable::Item(i), item.weight);
    }

    let mut cqm = ConstrainedQuadraticModel::new();
    cqm.set_objective(objective);
    cqm.add_constraint(CAPACITY_LABEL, lhs, Sense::Le, items.capacity())?;

    log::debug!(
        "Built knapsack CQM: {} items, capacity {}",
        items.len(),
        items.capacity()
    );
    Ok(cqm)
}

/// The capacity constraint of a model built by [`build_cqm`]
pub fn capacity_constraint(cqm: &ConstrainedQuadraticModel) -> Option<&Constraint> {
    cqm.constraint(CAPACITY_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_item_example() {
        let cqm = encode_cqm(&[10.0, 1.0], &[5.0, 7.0], 10.0).unwrap();

        assert_eq!(cqm.objective.linear(Variable::Item(0)), Some(-10.0));
        assert_eq!(cqm.objective.linear(Variable::Item(1)), Some(-1.0));
        assert_eq!(cqm.objective.num_interactions(), 0);
        assert_eq!(cqm.objective.offset, 0.0);

        assert_eq!(cqm.num_constraints(), 1);
        let constraint = capacity_constraint(&cqm).unwrap();
        assert_eq!(constraint.label, "capacity");
        assert_eq!(constraint.sense, Sense::Le);
        assert_eq!(constraint.rhs, 10.0);
        assert_eq!(constraint.lhs.coefficient(Variable::Item(0)), Some(5.0));
        assert_eq!(constraint.lhs.coefficient(Variable::Item(1)), Some(7.0));
    }

    #[test]
    fn test_one_term_per_item() {
        let weights = [3.0, 0.0, 8.0, 1.5, 2.0];
        let cqm = encode_cqm(&[1.0, 2.0, 3.0, 4.0, 5.0], &weights, 9.0).unwrap();
        let constraint = capacity_constraint(&cqm).unwrap();

        assert_eq!(constraint.lhs.len(), weights.len());
        for (i, &w) in weights.iter().enumerate() {
            assert_eq!(constraint.lhs.coefficient(Variable::Item(i)), Some(w));
        }
        assert_eq!(constraint.rhs, 9.0);
        // No slack variables on this path
        assert!(cqm.variables().iter().all(|v| v.is_item()));
        assert_eq!(cqm.num_variables(), weights.len());
    }

    #[test]
    fn test_capacity_validation() {
        // Zero capacity is valid: only the empty selection is feasible
        let cqm = encode_cqm(&[4.0], &[1.0], 0.0).unwrap();
        assert_eq!(capacity_constraint(&cqm).unwrap().rhs, 0.0);

        // Fractional capacity below 1 is fine here, unlike the penalty path
        assert!(encode_cqm(&[4.0], &[0.25], 0.5).is_ok());

        assert_eq!(encode_cqm(&[4.0], &[1.0], -1.0), Err(KnapsackError::InvalidCapacity(-1.0)));
        assert_eq!(encode_cqm(&[], &[], 5.0), Err(KnapsackError::EmptyItemSet));
    }

    #[test]
    fn test_idempotent() {
        let costs = [3.0, 8.0, 2.5];
        let weights = [2.0, 4.0, 1.0];
        assert_eq!(
            encode_cqm(&costs, &weights, 5.0).unwrap(),
            encode_cqm(&costs, &weights, 5.0).unwrap()
        );
    }
}
