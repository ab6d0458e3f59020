use crate::variable::{Assignment, Variable};

/// One candidate assignment returned by a sampler
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Value of every model variable
    pub assignment: Assignment,
    /// Model energy; for constrained models the objective value only
    pub energy: f64,
    /// Constraint feasibility, reported for constrained models only
    pub feasible: Option<bool>,
}

impl Sample {
    pub fn new(assignment: Assignment, energy: f64) -> Self {
        Self {
            assignment,
            energy,
            feasible: None,
        }
    }

    pub fn with_feasibility(assignment: Assignment, energy: f64, feasible: bool) -> Self {
        Self {
            assignment,
            energy,
            feasible: Some(feasible),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.feasible == Some(true)
    }

    pub fn value(&self, v: Variable) -> bool {
        self.assignment.get(&v).copied().unwrap_or(false)
    }
}

/// Samples returned by one sampler call, ordered by ascending energy
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Sample>", into = "Vec<Sample>"))]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(mut samples: Vec<Sample>) -> Self {
        // Stable sort keeps the sampler's order among equal energies
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { samples }
    }

    /// Lowest-energy sample regardless of feasibility
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Lowest-energy sample flagged feasible
    pub fn lowest_feasible(&self) -> Option<&Sample> {
        self.samples.iter().find(|s| s.is_feasible())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        SampleSet::new(iter.into_iter().collect())
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        SampleSet::new(samples)
    }
}

impl From<SampleSet> for Vec<Sample> {
    fn from(set: SampleSet) -> Self {
        set.samples
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
