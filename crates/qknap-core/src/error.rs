use qknap_model::{ModelError, SamplerError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnapsackError {
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(f64),
    #[error("Item set is empty")]
    EmptyItemSet,
    #[error("No feasible solution among the returned samples")]
    NoFeasibleSolution,
    #[error("Sampler returned no samples")]
    EmptySampleSet,
    #[error("Got {costs} costs but {weights} weights")]
    LengthMismatch { costs: usize, weights: usize },
    #[error("Got {names} names for {items} items")]
    NameCountMismatch { names: usize, items: usize },
    #[error("Item {index} has invalid weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("Item {index} has invalid cost {cost}")]
    InvalidCost { index: usize, cost: f64 },
    #[error("Item index out of range: {0}")]
    ItemOutOfRange(usize),
    #[error("Item selected more than once: {0}")]
    DuplicateItem(usize),
    #[error("Unknown encoding '{0}', expected 'bqm' or 'cqm'")]
    UnknownEncoding(String),
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
