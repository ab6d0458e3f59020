use std::collections::HashSet;

use crate::error::KnapsackError;

/// A single knapsack item; its identity is its position in [`Items`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Value gained by selecting the item
    pub cost: f64,
    pub weight: f64,
    pub name: Option<String>,
}

/// Validated, immutable item list plus the capacity bound
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ItemsData", into = "ItemsData"))]
pub struct Items {
    items: Vec<Item>,
    capacity: f64,
}

/// Unvalidated wire form of [`Items`]
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ItemsData {
    items: Vec<Item>,
    capacity: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<ItemsData> for Items {
    type Error = KnapsackError;

    fn try_from(data: ItemsData) -> Result<Self, Self::Error> {
        Items::from_items(data.items, data.capacity)
    }
}

#[cfg(feature = "serde")]
impl From<Items> for ItemsData {
    fn from(items: Items) -> Self {
        ItemsData {
            items: items.items,
            capacity: items.capacity,
        }
    }
}

/// Aggregate cost and weight of a selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub cost: f64,
    pub weight: f64,
}

impl Items {
    /// Build from parallel cost and weight sequences.
    ///
    /// Capacity must be finite and non-negative here; the penalty encoding
    /// applies its own stricter bound.
    pub fn new(costs: &[f64], weights: &[f64], capacity: f64) -> Result<Self, KnapsackError> {
        if costs.len() != weights.len() {
            return Err(KnapsackError::LengthMismatch {
                costs: costs.len(),
                weights: weights.len(),
            });
        }
        let items = costs
            .iter()
            .zip(weights)
            .map(|(&cost, &weight)| Item { cost, weight, name: None })
            .collect();
        Self::from_items(items, capacity)
    }

    pub fn with_names(
        names: Vec<String>,
        costs: &[f64],
        weights: &[f64],
        capacity: f64,
    ) -> Result<Self, KnapsackError> {
        let mut items = Self::new(costs, weights, capacity)?;
        if names.len() != items.len() {
            return Err(KnapsackError::NameCountMismatch {
                names: names.len(),
                items: items.len(),
            });
        }
        for (item, name) in items.items.iter_mut().zip(names) {
            item.name = Some(name);
        }
        Ok(items)
    }

    pub fn from_items(items: Vec<Item>, capacity: f64) -> Result<Self, KnapsackError> {
        if items.is_empty() {
            return Err(KnapsackError::EmptyItemSet);
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(KnapsackError::InvalidCapacity(capacity));
        }
        for (index, item) in items.iter().enumerate() {
            if !item.cost.is_finite() {
                return Err(KnapsackError::InvalidCost { index, cost: item.cost });
            }
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(KnapsackError::InvalidWeight {
                    index,
                    weight: item.weight,
                });
            }
        }
        Ok(Self { items, capacity })
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn costs(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.cost).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.weight).collect()
    }

    /// Total cost and weight of the selected item indices
    pub fn evaluate(&self, selected: &[usize]) -> Result<Totals, KnapsackError> {
        let mut seen = HashSet::with_capacity(selected.len());
        let mut totals = Totals { cost: 0.0, weight: 0.0 };
        for &index in selected {
            let item = self.get(index).ok_or(KnapsackError::ItemOutOfRange(index))?;
            if !seen.insert(index) {
                return Err(KnapsackError::DuplicateItem(index));
            }
            totals.cost += item.cost;
            totals.weight += item.weight;
        }
        Ok(totals)
    }
}
