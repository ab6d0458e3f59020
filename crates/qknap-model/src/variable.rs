use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A binary decision variable, identified by its role and position.
///
/// Ordering puts every item variable before every slack variable, then
/// orders by index, so iterating a model's terms is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// `x_i`: item `i` is selected
    Item(usize),
    /// `y_k`: auxiliary slack bit `k` of the capacity encoding
    Slack(usize),
}

/// A 0/1 value for each variable of a model
pub type Assignment = BTreeMap<Variable, bool>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid variable name: {0}")]
pub struct ParseVariableError(pub String);

impl Variable {
    pub fn index(&self) -> usize {
        match self {
            Variable::Item(i) | Variable::Slack(i) => *i,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Variable::Item(_))
    }

    pub fn is_slack(&self) -> bool {
        matches!(self, Variable::Slack(_))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Item(i) => write!(f, "x{}", i),
            Variable::Slack(k) => write!(f, "y{}", k),
        }
    }
}

impl FromStr for Variable {
    type Err = ParseVariableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVariableError(s.to_string());
        let (kind, index) = s.split_at_checked(1).ok_or_else(err)?;
        let index: usize = index.parse().map_err(|_| err())?;
        match kind {
            "x" => Ok(Variable::Item(index)),
            "y" => Ok(Variable::Slack(index)),
            _ => Err(err()),
        }
    }
}

// Variables appear as map keys in every model, and JSON only allows string
// keys, so they serialize through their display form.
#[cfg(feature = "serde")]
impl serde::Serialize for Variable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Variable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_order_before_slack() {
        let mut vars = vec![
            Variable::Slack(0),
            Variable::Item(3),
            Variable::Slack(2),
            Variable::Item(0),
        ];
        vars.sort();
        assert_eq!(
            vars,
            vec![
                Variable::Item(0),
                Variable::Item(3),
                Variable::Slack(0),
                Variable::Slack(2),
            ]
        );
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Variable::Item(12).to_string(), "x12");
        assert_eq!(Variable::Slack(4).to_string(), "y4");
        assert_eq!("x7".parse::<Variable>().unwrap(), Variable::Item(7));
        assert_eq!("y0".parse::<Variable>().unwrap(), Variable::Slack(0));
        assert!("z1".parse::<Variable>().is_err());
        assert!("x".parse::<Variable>().is_err());
        assert!("".parse::<Variable>().is_err());
        assert!("x-1".parse::<Variable>().is_err());
    }
}
