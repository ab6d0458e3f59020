use crate::bqm::BinaryQuadraticModel;
use crate::cqm::ConstrainedQuadraticModel;
use crate::error::SamplerError;
use crate::sample::SampleSet;
use crate::variable::Variable;

/// A model ready to be handed to a sampler
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Model {
    Bqm(BinaryQuadraticModel),
    Cqm(ConstrainedQuadraticModel),
}

impl Model {
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Model::Bqm(bqm) => bqm.variables(),
            Model::Cqm(cqm) => cqm.variables(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    pub fn as_bqm(&self) -> Option<&BinaryQuadraticModel> {
        match self {
            Model::Bqm(bqm) => Some(bqm),
            Model::Cqm(_) => None,
        }
    }

    pub fn as_cqm(&self) -> Option<&ConstrainedQuadraticModel> {
        match self {
            Model::Cqm(cqm) => Some(cqm),
            Model::Bqm(_) => None,
        }
    }
}

impl From<BinaryQuadraticModel> for Model {
    fn from(bqm: BinaryQuadraticModel) -> Self {
        Model::Bqm(bqm)
    }
}

impl From<ConstrainedQuadraticModel> for Model {
    fn from(cqm: ConstrainedQuadraticModel) -> Self {
        Model::Cqm(cqm)
    }
}

/// Anything that turns a model into candidate assignments.
///
/// Implementations must return samples carrying a feasibility flag for
/// constrained models. A successful call with no samples is allowed here;
/// callers decide whether that is an error.
pub trait Sampler {
    fn sample(&self, model: &Model) -> Result<SampleSet, SamplerError>;
}

impl<S: Sampler + ?Sized> Sampler for &S {
    fn sample(&self, model: &Model) -> Result<SampleSet, SamplerError> {
        (**self).sample(model)
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample(&self, model: &Model) -> Result<SampleSet, SamplerError> {
        (**self).sample(model)
    }
}
