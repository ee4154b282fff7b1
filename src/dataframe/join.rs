//! Relational merge on key columns and join on the row index

use std::collections::{HashMap, HashSet};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::index::{Label, TableIndex};
use crate::value::Value;

/// Join type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Inner join (only key combinations present on both sides)
    Inner,
    /// Left join (all rows of the left table)
    #[default]
    Left,
    /// Right join (all rows of the right table)
    Right,
    /// Outer join (all rows of both tables)
    Outer,
}

const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Pair up rows of two sides from their keys.
///
/// A `None` key never matches. Inner and left follow left row order with
/// right matches in right order; right follows right order; outer is left
/// order followed by the right rows that found no partner.
fn match_rows<K>(
    left: &[Option<K>],
    right: &[Option<K>],
    how: JoinType,
) -> Vec<(Option<usize>, Option<usize>)>
where
    K: std::hash::Hash + Eq,
{
    fn positions<K: std::hash::Hash + Eq>(keys: &[Option<K>]) -> HashMap<&K, Vec<usize>> {
        let mut map: HashMap<&K, Vec<usize>> = HashMap::new();
        for (pos, key) in keys.iter().enumerate() {
            if let Some(k) = key {
                map.entry(k).or_default().push(pos);
            }
        }
        map
    }

    let mut pairs = Vec::new();
    match how {
        JoinType::Right => {
            let left_map = positions(left);
            for (j, key) in right.iter().enumerate() {
                match key.as_ref().and_then(|k| left_map.get(k)) {
                    Some(matches) => pairs.extend(matches.iter().map(|&i| (Some(i), Some(j)))),
                    None => pairs.push((None, Some(j))),
                }
            }
        }
        JoinType::Inner | JoinType::Left | JoinType::Outer => {
            let right_map = positions(right);
            let mut used = vec![false; right.len()];
            for (i, key) in left.iter().enumerate() {
                match key.as_ref().and_then(|k| right_map.get(k)) {
                    Some(matches) => {
                        for &j in matches {
                            used[j] = true;
                            pairs.push((Some(i), Some(j)));
                        }
                    }
                    None if how != JoinType::Inner => pairs.push((Some(i), None)),
                    None => {}
                }
            }
            if how == JoinType::Outer {
                pairs.extend(
                    used.iter()
                        .enumerate()
                        .filter(|(_, u)| !**u)
                        .map(|(j, _)| (None, Some(j))),
                );
            }
        }
    }
    pairs
}

fn pick(values: &[Value], pos: Option<usize>) -> Value {
    pos.map(|p| values[p].clone()).unwrap_or(Value::NA)
}

/// Non-key columns of both sides laid out for the matched pairs,
/// overlapping names suffixed with `_x` / `_y`
fn side_columns(
    left: &DataFrame,
    right: &DataFrame,
    exclude: &HashSet<&str>,
    pairs: &[(Option<usize>, Option<usize>)],
) -> Vec<(String, Vec<Value>)> {
    let left_names: Vec<&String> = left
        .column_names
        .iter()
        .filter(|n| !exclude.contains(n.as_str()))
        .collect();
    let right_names: Vec<&String> = right
        .column_names
        .iter()
        .filter(|n| !exclude.contains(n.as_str()))
        .collect();
    let overlap: HashSet<&String> = left_names
        .iter()
        .filter(|n| right_names.contains(n))
        .copied()
        .collect();

    let mut columns = Vec::with_capacity(left_names.len() + right_names.len());
    for (names, df, suffix, left_side) in [
        (&left_names, left, LEFT_SUFFIX, true),
        (&right_names, right, RIGHT_SUFFIX, false),
    ] {
        for name in names.iter() {
            let cells = &df.columns[name.as_str()];
            let values = pairs
                .iter()
                .map(|(l, r)| pick(cells, if left_side { *l } else { *r }))
                .collect();
            let label = if overlap.contains(name) {
                format!("{}{}", name, suffix)
            } else {
                name.to_string()
            };
            columns.push((label, values));
        }
    }
    columns
}

/// Merge two frames on shared key columns.
///
/// Duplicate keys fan out into every matching pair. Output columns are the
/// keys, then the left non-key columns, then the right ones. The result
/// has a fresh positional index.
pub fn merge(left: &DataFrame, right: &DataFrame, on: &[&str], how: JoinType) -> Result<DataFrame> {
    if on.is_empty() {
        return Err(Error::InvalidInput("merge needs at least one key column".to_string()));
    }
    for key in on {
        if !left.contains_column(key) {
            return Err(Error::ColumnNotFound(format!("{} (left)", key)));
        }
        if !right.contains_column(key) {
            return Err(Error::ColumnNotFound(format!("{} (right)", key)));
        }
    }

    let keys_of = |df: &DataFrame| -> Vec<Option<Vec<Value>>> {
        (0..df.row_count())
            .map(|row| {
                let key: Vec<Value> = on.iter().map(|c| df.columns[*c][row].clone()).collect();
                if key.iter().any(Value::is_na) {
                    None
                } else {
                    Some(key)
                }
            })
            .collect()
    };
    let pairs = match_rows(&keys_of(left), &keys_of(right), how);
    log::debug!(
        "merge {:?} on {:?}: {} x {} rows gives {}",
        how,
        on,
        left.row_count(),
        right.row_count(),
        pairs.len()
    );

    let mut columns: Vec<(String, Vec<Value>)> = on
        .iter()
        .map(|key| {
            let (l, r) = (&left.columns[*key], &right.columns[*key]);
            let values = pairs
                .iter()
                .map(|(i, j)| match i {
                    Some(_) => pick(l, *i),
                    None => pick(r, *j),
                })
                .collect();
            (key.to_string(), values)
        })
        .collect();
    let exclude: HashSet<&str> = on.iter().copied().collect();
    columns.extend(side_columns(left, right, &exclude, &pairs));
    DataFrame::from_columns(columns, None)
}

impl DataFrame {
    /// Method form of [`merge`]
    pub fn merge(&self, other: &DataFrame, on: &[&str], how: JoinType) -> Result<DataFrame> {
        merge(self, other, on, how)
    }

    /// Merge keyed on row labels instead of columns.
    ///
    /// The result is indexed by the matched labels; overlapping column
    /// names get `_x` / `_y` suffixes.
    pub fn join(&self, other: &DataFrame, how: JoinType) -> Result<DataFrame> {
        let keys_of = |index: &TableIndex| -> Vec<Option<Label>> {
            index
                .labels()
                .into_iter()
                .map(|label| {
                    if matches!(&label, Label::Scalar(v) if v.is_na()) {
                        None
                    } else {
                        Some(label)
                    }
                })
                .collect()
        };
        let pairs = match_rows(&keys_of(&self.index), &keys_of(&other.index), how);
        log::debug!("join {:?}: {} rows", how, pairs.len());

        let labels = pairs
            .iter()
            .filter_map(|(i, j)| match i {
                Some(i) => self.index.label(*i),
                None => j.and_then(|j| other.index.label(j)),
            })
            .collect();
        let index = TableIndex::from_labels(labels, self.index.names())?;
        let columns = side_columns(self, other, &HashSet::new(), &pairs);
        DataFrame::from_columns(columns, Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::index::Index;

    #[test]
    fn test_fan_out_on_duplicate_keys() {
        let left = DataFrame::from_columns(
            vec![("key", cells!["a", "a", "b"]), ("l", cells![1, 2, 3])],
            None,
        )
        .unwrap();
        let right = DataFrame::from_columns(
            vec![("key", cells!["a", "a", "c"]), ("r", cells![10, 20, 30])],
            None,
        )
        .unwrap();
        let inner = merge(&left, &right, &["key"], JoinType::Inner).unwrap();
        assert_eq!(inner.row_count(), 4);
        assert_eq!(inner.column_values("r").unwrap(), &cells![10, 20, 10, 20]);
        let outer = merge(&left, &right, &["key"], JoinType::Outer).unwrap();
        assert_eq!(outer.row_count(), 6);
        assert_eq!(outer.column_values("key").unwrap()[5], Value::from("c"));
    }

    #[test]
    fn test_missing_keys_never_match() {
        let left = DataFrame::from_columns(vec![("k", cells![Value::NA]), ("a", cells![1])], None).unwrap();
        let right = DataFrame::from_columns(vec![("k", cells![Value::NA]), ("b", cells![2])], None).unwrap();
        assert_eq!(merge(&left, &right, &["k"], JoinType::Inner).unwrap().row_count(), 0);
    }

    #[test]
    fn test_join_on_index() {
        let left = DataFrame::from_columns(
            vec![("A", cells!["A0", "A1", "A2"])],
            Some(TableIndex::Simple(Index::new(cells!["K0", "K1", "K2"]))),
        )
        .unwrap();
        let right = DataFrame::from_columns(
            vec![("C", cells!["C0", "C2", "C3"])],
            Some(TableIndex::Simple(Index::new(cells!["K0", "K2", "K3"]))),
        )
        .unwrap();
        let joined = left.join(&right, JoinType::default()).unwrap();
        assert_eq!(joined.column_values("C").unwrap(), &cells!["C0", Value::NA, "C2"]);
        let outer = left.join(&right, JoinType::Outer).unwrap();
        assert_eq!(outer.row_count(), 4);
        assert_eq!(outer.at("K3", "C").unwrap(), Value::from("C3"));
    }
}
