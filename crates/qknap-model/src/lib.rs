mod anneal;
mod bqm;
mod cqm;
mod dense;
mod error;
mod exact;
mod sample;
mod sampler;
mod variable;

pub use anneal::SimulatedAnnealingSampler;
pub use bqm::BinaryQuadraticModel;
pub use cqm::{ConstrainedQuadraticModel, Constraint, FEASIBILITY_TOLERANCE, LinearExpression, Sense};
pub use error::{ModelError, SamplerError};
pub use exact::ExactSolver;
pub use sample::{Sample, SampleSet};
pub use sampler::{Model, Sampler};
pub use variable::{Assignment, ParseVariableError, Variable};
