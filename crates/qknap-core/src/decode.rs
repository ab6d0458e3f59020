use qknap_model::{Assignment, Sample, SampleSet, Variable};

use crate::encoding::Encoding;
use crate::error::KnapsackError;

/// Selected item indices (ascending) and the energy of the chosen sample
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoded {
    pub selected: Vec<usize>,
    pub energy: f64,
}

/// Indices of item variables set to 1; slack bits are skipped
pub fn selected_items(assignment: &Assignment) -> Vec<usize> {
    // Item variables sort before slack ones and by index
    assignment
        .iter()
        .filter_map(|(v, &on)| match v {
            Variable::Item(i) if on => Some(*i),
            _ => None,
        })
        .collect()
}

/// Decode one sample without any feasibility check
pub fn decode_sample(sample: &Sample) -> Decoded {
    Decoded {
        selected: selected_items(&sample.assignment),
        energy: sample.energy,
    }
}

/// Pick the sample to report and decode it.
///
/// For [`Encoding::Bqm`] this is the lowest-energy sample. Its selection may
/// still exceed the capacity when the penalty weight was too small; that is
/// reported as-is. For [`Encoding::Cqm`] it is the lowest-energy sample
/// flagged feasible.
pub fn decode(samples: &SampleSet, mode: Encoding) -> Result<Decoded, KnapsackError> {
    let first = samples.first().ok_or(KnapsackError::EmptySampleSet)?;
    let chosen = match mode {
        Encoding::Bqm => first,
        Encoding::Cqm => samples
            .lowest_feasible()
            .ok_or(KnapsackError::NoFeasibleSolution)?,
    };
    Ok(decode_sample(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sorted_regardless_of_insertion_order() {
        let mut assignment = Assignment::new();
        for (v, on) in [
            (Variable::Slack(1), true),
            (Variable::Item(7), true),
            (Variable::Item(2), false),
            (Variable::Slack(0), true),
            (Variable::Item(4), true),
            (Variable::Item(0), true),
        ] {
            assignment.insert(v, on);
        }
        assert_eq!(selected_items(&assignment), vec![0, 4, 7]);
    }

    #[test]
    fn test_slack_bits_never_selected() {
        let assignment: Assignment = (0..4).map(|k| (Variable::Slack(k), true)).collect();
        assert!(selected_items(&assignment).is_empty());
    }

    #[test]
    fn test_bqm_takes_lowest_energy_without_feasibility_check() {
        let samples = SampleSet::new(vec![
            Sample::new([(Variable::Item(1), true)].into_iter().collect(), -3.0),
            Sample::new(
                [(Variable::Item(0), true), (Variable::Item(2), true), (Variable::Slack(0), true)]
                    .into_iter()
                    .collect(),
                -7.5,
            ),
        ]);
        let decoded = decode(&samples, Encoding::Bqm).unwrap();
        assert_eq!(decoded, Decoded { selected: vec![0, 2], energy: -7.5 });
    }

    #[test]
    fn test_cqm_feasibility_filter() {
        let candidates = [(false, -10.0), (true, -11.0), (false, -8.0), (true, -9.0)];
        let samples: SampleSet = candidates
            .iter()
            .enumerate()
            .map(|(i, &(feasible, energy))| {
                Sample::with_feasibility([(Variable::Item(i), true)].into_iter().collect(), energy, feasible)
            })
            .collect();

        let decoded = decode(&samples, Encoding::Cqm).unwrap();
        assert_eq!(decoded.energy, -11.0);
        assert_eq!(decoded.selected, vec![1]);
    }

    #[test]
    fn test_cqm_skips_lower_infeasible() {
        let samples = SampleSet::new(vec![
            Sample::with_feasibility([(Variable::Item(0), true)].into_iter().collect(), -20.0, false),
            Sample::with_feasibility([(Variable::Item(1), true)].into_iter().collect(), -5.0, true),
        ]);
        let decoded = decode(&samples, Encoding::Cqm).unwrap();
        assert_eq!(decoded, Decoded { selected: vec![1], energy: -5.0 });

        // The penalty decoder would have taken the infeasible one
        assert_eq!(decode(&samples, Encoding::Bqm).unwrap().selected, vec![0]);
    }

    #[test]
    fn test_all_infeasible() {
        let samples = SampleSet::new(vec![
            Sample::with_feasibility(Assignment::new(), -1.0, false),
            Sample::with_feasibility(Assignment::new(), -2.0, false),
        ]);
        assert_eq!(decode(&samples, Encoding::Cqm), Err(KnapsackError::NoFeasibleSolution));
    }

    #[test]
    fn test_empty_sample_set() {
        let samples = SampleSet::default();
        assert_eq!(decode(&samples, Encoding::Bqm), Err(KnapsackError::EmptySampleSet));
        assert_eq!(decode(&samples, Encoding::Cqm), Err(KnapsackError::EmptySampleSet));
    }
}
