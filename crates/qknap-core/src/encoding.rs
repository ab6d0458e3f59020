use std::fmt;
use std::str::FromStr;

use qknap_model::Model;

use crate::bqm::build_bqm;
use crate::cqm::build_cqm;
use crate::error::KnapsackError;
use crate::items::Items;

/// How the capacity inequality is handed to the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// Fold the constraint into the energy with slack bits and a penalty
    #[default]
    Bqm,
    /// Keep the constraint explicit
    Cqm,
}

impl Encoding {
    pub fn encode(&self, costs: &[f64], weights: &[f64], capacity: f64) -> Result<Model, KnapsackError> {
        self.encode_items(&Items::new(costs, weights, capacity)?)
    }

    pub fn encode_items(&self, items: &Items) -> Result<Model, KnapsackError> {
        Ok(match self {
            Encoding::Bqm => Model::Bqm(build_bqm(items)?.model),
            Encoding::Cqm => Model::Cqm(build_cqm(items)?),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Bqm => "bqm",
            Encoding::Cqm => "cqm",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bqm" | "qubo" => Ok(Encoding::Bqm),
            "cqm" => Ok(Encoding::Cqm),
            _ => Err(KnapsackError::UnknownEncoding(s.to_string())),
        }
    }
}
