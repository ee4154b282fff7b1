//! Concatenation along either axis

use std::collections::HashMap;

use crate::dataframe::{Axis, DataFrame};
use crate::error::{Error, Result};
use crate::index::{Label, TableIndex};
use crate::value::Value;

/// Stack frames along an axis.
///
/// `Axis::Rows` stacks vertically: columns are unioned in first-seen order,
/// cells a frame lacks are missing, and row labels are appended as they are
/// (duplicates kept). `Axis::Columns` stacks horizontally: rows are aligned by
/// (label, occurrence) and labels are unioned. A column name found in more
/// than one input is suffixed with `_1`, `_2`, ... in input order.
pub fn concat(frames: &[&DataFrame], axis: Axis) -> Result<DataFrame> {
    let (first, rest) = frames
        .split_first()
        .ok_or_else(|| Error::InvalidInput("no frames to concatenate".to_string()))?;
    let result = match axis {
        Axis::Rows => concat_rows(first, rest)?,
        Axis::Columns => concat_columns(frames)?,
    };
    log::debug!(
        "concat of {} frames along {:?} gives shape {:?}",
        frames.len(),
        axis,
        result.shape()
    );
    Ok(result)
}

fn concat_rows(first: &DataFrame, rest: &[&DataFrame]) -> Result<DataFrame> {
    let mut names: Vec<String> = first.column_names.clone();
    for df in rest {
        for name in &df.column_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }

    let mut index = first.index.clone();
    for df in rest {
        index = index.append(&df.index)?;
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let mut values = Vec::with_capacity(index.len());
            for df in std::iter::once(first).chain(rest.iter().copied()) {
                match df.columns.get(&name) {
                    Some(cells) => values.extend(cells.iter().cloned()),
                    None => values.extend(std::iter::repeat(Value::NA).take(df.row_count())),
                }
            }
            (name, values)
        })
        .collect();
    DataFrame::from_columns(columns, Some(index))
}

fn concat_columns(frames: &[&DataFrame]) -> Result<DataFrame> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for df in frames {
        for name in &df.column_names {
            *occurrences.entry(name.as_str()).or_default() += 1;
        }
    }

    let mut labels: Vec<Label> = Vec::new();
    let mut index: Option<TableIndex> = None;
    let mut columns: Vec<(String, Vec<Value>)> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for df in frames {
        let pairs = match &index {
            None => (0..df.row_count()).map(|i| (None, Some(i))).collect(),
            Some(acc) => acc.align(&df.index),
        };

        // rows already accumulated keep their place; new labels go at the end
        let mut next_labels = Vec::with_capacity(pairs.len());
        for (acc_pos, df_pos) in &pairs {
            let label = match (acc_pos, df_pos) {
                (Some(i), _) => labels.get(*i).cloned(),
                (None, Some(j)) => df.index.label(*j),
                (None, None) => None,
            };
            next_labels.extend(label);
        }
        for (_, values) in columns.iter_mut() {
            let realigned = pairs
                .iter()
                .map(|(acc_pos, _)| acc_pos.map(|i| values[i].clone()).unwrap_or(Value::NA))
                .collect();
            *values = realigned;
        }
        for name in &df.column_names {
            let cells = &df.columns[name];
            let values = pairs
                .iter()
                .map(|(_, df_pos)| df_pos.map(|j| cells[j].clone()).unwrap_or(Value::NA))
                .collect();
            let key = name.as_str();
            let label = if occurrences.get(key).copied().unwrap_or(0) > 1 {
                let n = seen.entry(key).or_default();
                *n += 1;
                format!("{}_{}", name, n)
            } else {
                name.clone()
            };
            columns.push((label, values));
        }

        let names = index
            .as_ref()
            .map(|i| i.names())
            .unwrap_or_else(|| df.index.names());
        index = Some(TableIndex::from_labels(next_labels.clone(), names)?);
        labels = next_labels;
    }

    DataFrame::from_columns(columns, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::index::Index;

    #[test]
    fn test_single_frame_is_identity() {
        let df = DataFrame::from_columns(vec![("A", cells![1, 2])], None).unwrap();
        assert_eq!(concat(&[&df], Axis::Rows).unwrap(), df);
        assert_eq!(concat(&[&df], Axis::Columns).unwrap(), df);
    }

    #[test]
    fn test_columns_axis_unions_labels() {
        let a = DataFrame::from_columns(
            vec![("A", cells![1, 2])],
            Some(TableIndex::Simple(Index::new(cells!["x", "y"]))),
        )
        .unwrap();
        let b = DataFrame::from_columns(
            vec![("B", cells![3, 4])],
            Some(TableIndex::Simple(Index::new(cells!["y", "z"]))),
        )
        .unwrap();
        let c = concat(&[&a, &b], Axis::Columns).unwrap();
        assert_eq!(c.row_count(), 3);
        assert_eq!(c.column_values("A").unwrap(), &cells![1, 2, Value::NA]);
        assert_eq!(c.column_values("B").unwrap(), &cells![Value::NA, 3, 4]);
    }
}
