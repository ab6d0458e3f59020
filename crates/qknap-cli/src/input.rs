use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("line {line}: expected 'cost,weight' or 'name,cost,weight', found {fields} fields")]
    FieldCount { line: usize, fields: usize },
    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: some items are named and some are not")]
    MixedNames { line: usize },
    #[error("no items found")]
    Empty,
}

/// Parallel item columns read from a text file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemTable {
    pub names: Option<Vec<String>>,
    pub costs: Vec<f64>,
    pub weights: Vec<f64>,
}

fn number(field: &str, line: usize) -> Result<f64, InputError> {
    field.trim().parse().map_err(|_| InputError::InvalidNumber {
        line,
        value: field.trim().to_string(),
    })
}

/// Parse one item per line as `cost,weight` or `name,cost,weight`.
///
/// Blank lines and lines starting with `#` are skipped. All items must use
/// the same layout.
pub fn parse_items(source: &str) -> Result<ItemTable, InputError> {
    let mut table = ItemTable::default();
    let mut names: Vec<String> = Vec::new();
    let mut named: Option<bool> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = text.split(',').collect();
        let has_name = match fields.len() {
            2 => false,
            3 => true,
            n => return Err(InputError::FieldCount { line, fields: n }),
        };
        if *named.get_or_insert(has_name) != has_name {
            return Err(InputError::MixedNames { line });
        }

        let values = if has_name {
            names.push(fields[0].trim().to_string());
            &fields[1..]
        } else {
            &fields[..]
        };
        table.costs.push(number(values[0], line)?);
        table.weights.push(number(values[1], line)?);
    }

    if table.costs.is_empty() {
        return Err(InputError::Empty);
    }
    if named == Some(true) {
        table.names = Some(names);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed() {
        let table = parse_items("35,3\n 85 , 4\n\n# comment\n30,6\n").unwrap();
        assert_eq!(table.costs, vec![35.0, 85.0, 30.0]);
        assert_eq!(table.weights, vec![3.0, 4.0, 6.0]);
        assert!(table.names.is_none());
    }

    #[test]
    fn test_named() {
        let table = parse_items("tent,10,5\nstove,1,7.5\n").unwrap();
        assert_eq!(
            table.names,
            Some(vec!["tent".to_string(), "stove".to_string()])
        );
        assert_eq!(table.weights, vec![5.0, 7.5]);
    }

    #[test]
    fn test_bundled_small() {
        let table = parse_items(include_str!("../../../data/small.csv")).unwrap();
        assert!(table.names.is_none());
        assert_eq!(table.costs, vec![35.0, 85.0, 30.0, 50.0, 70.0, 80.0, 55.0]);
        assert_eq!(table.weights, vec![3.0, 4.0, 6.0, 3.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_bundled_named() {
        let table = parse_items(include_str!("../../../data/named.csv")).unwrap();
        let names: Vec<&str> = table.names.as_deref().unwrap().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["tent", "stove", "lantern", "rope", "water"]);
        assert_eq!(table.costs, vec![10.0, 1.0, 6.0, 3.0, 9.0]);
        assert_eq!(table.weights, vec![5.0, 7.0, 2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_items("1,2\n3\n"),
            Err(InputError::FieldCount { line: 2, fields: 1 })
        );
        assert_eq!(
            parse_items("1,2\n3,x\n"),
            Err(InputError::InvalidNumber { line: 2, value: "x".to_string() })
        );
        assert_eq!(parse_items("1,2\na,3,4\n"), Err(InputError::MixedNames { line: 2 }));
        assert_eq!(parse_items("# only a comment\n"), Err(InputError::Empty));
    }
}
