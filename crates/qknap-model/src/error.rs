use thiserror::Error;

use crate::variable::Variable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Duplicate constraint label: {0}")]
    DuplicateLabel(String),
    #[error("Self-interaction on {0}; use a linear bias instead")]
    SelfInteraction(Variable),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("Model has {found} variables, exact enumeration is limited to {limit}")]
    TooManyVariables { found: usize, limit: usize },
    #[error("Invalid sampler parameter: {0}")]
    InvalidParameter(String),
}
