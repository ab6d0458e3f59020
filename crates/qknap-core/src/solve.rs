use qknap_model::{FEASIBILITY_TOLERANCE, Sampler};

use crate::decode::decode;
use crate::encoding::Encoding;
use crate::error::KnapsackError;
use crate::items::Items;

/// Decoded selection plus the totals needed to interpret it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackSolution {
    pub encoding: Encoding,
    /// Selected item indices, ascending
    pub selected: Vec<usize>,
    /// Energy of the chosen sample as reported by the sampler
    pub energy: f64,
    pub total_cost: f64,
    pub total_weight: f64,
    /// Whether the selection respects the capacity, up to
    /// [`FEASIBILITY_TOLERANCE`]; only ever false for penalty encodings whose
    /// multiplier was too small
    pub within_capacity: bool,
}

impl KnapsackSolution {
    /// Names of the selected items, for item sets that carry names
    pub fn names<'a>(&self, items: &'a Items) -> Vec<&'a str> {
        self.selected
            .iter()
            .filter_map(|&i| items.get(i).and_then(|item| item.name.as_deref()))
            .collect()
    }
}

/// Encode, sample, decode and evaluate in one call
pub fn solve<S: Sampler + ?Sized>(
    items: &Items,
    encoding: Encoding,
    sampler: &S,
) -> Result<KnapsackSolution, KnapsackError> {
    let model = encoding.encode_items(items)?;
    log::debug!(
        "Sampling {} model with {} variables",
        encoding,
        model.num_variables()
    );

    let samples = sampler.sample(&model)?;
    let decoded = decode(&samples, encoding)?;
    let totals = items.evaluate(&decoded.selected)?;
    // Same tolerance the constrained samplers use to flag feasibility
    let within_capacity = totals.weight - items.capacity() <= FEASIBILITY_TOLERANCE;

    if !within_capacity {
        match encoding {
            Encoding::Bqm => log::warn!(
                "Selected weight {} exceeds capacity {}; the penalty weight was not large enough",
                totals.weight,
                items.capacity()
            ),
            Encoding::Cqm => log::warn!(
                "Selected weight {} exceeds capacity {}",
                totals.weight,
                items.capacity()
            ),
        }
    }

    Ok(KnapsackSolution {
        encoding,
        selected: decoded.selected,
        energy: decoded.energy,
        total_cost: totals.cost,
        total_weight: totals.weight,
        within_capacity,
    })
}
