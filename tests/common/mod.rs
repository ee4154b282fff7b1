//! Sample frames and temporary paths shared by the integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use tabrs::{cells, DataFrame, Index, MultiIndex, TableIndex, Value};
use tempfile::TempDir;

/// Index of text labels
pub fn labels(values: &[&str]) -> TableIndex {
    TableIndex::Simple(Index::new(values.iter().map(|&v| Value::from(v)).collect()))
}

/// Seeded 5 x 4 random frame indexed A..E with columns W..Z
pub fn random_frame() -> DataFrame {
    DataFrame::random_normal(labels(&["A", "B", "C", "D", "E"]), &["W", "X", "Y", "Z"], 101).unwrap()
}

/// `{A: [1, 2, NaN], B: [5, NaN, NaN], C: [1, 2, 3]}`
pub fn missing_frame() -> DataFrame {
    DataFrame::from_columns(
        vec![
            ("A", cells![1.0, 2.0, f64::NAN]),
            ("B", cells![5.0, f64::NAN, f64::NAN]),
            ("C", cells![1, 2, 3]),
        ],
        None,
    )
    .unwrap()
}

pub fn sales_frame() -> DataFrame {
    DataFrame::from_columns(
        vec![
            ("Company", cells!["GOOG", "GOOG", "MSFT", "MSFT", "FB", "FB"]),
            ("Person", cells!["Sam", "Charlie", "Amy", "Vanessa", "Carl", "Sarah"]),
            ("Sales", cells![200, 120, 340, 124, 243, 350]),
        ],
        None,
    )
    .unwrap()
}

/// 6 x 2 frame on a (Groups, Num) index: G1/G2 by 1..3
pub fn hierarchical_frame() -> DataFrame {
    let index = MultiIndex::from_arrays(
        vec![cells!["G1", "G1", "G1", "G2", "G2", "G2"], cells![1, 2, 3, 1, 2, 3]],
        Some(vec![Some("Groups".to_string()), Some("Num".to_string())]),
    )
    .unwrap();
    DataFrame::from_columns(
        vec![
            ("A", cells![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            ("B", cells![1.1, 1.2, 1.3, 1.4, 1.5, 1.6]),
        ],
        Some(TableIndex::Multi(index)),
    )
    .unwrap()
}

/// Four rows of `A{i}`..`D{i}` text cells indexed `start..start + 4`
pub fn block(start: usize) -> DataFrame {
    let rows: Vec<usize> = (start..start + 4).collect();
    let columns: Vec<(String, Vec<Value>)> = ["A", "B", "C", "D"]
        .iter()
        .map(|c| {
            (
                c.to_string(),
                rows.iter().map(|i| Value::from(format!("{}{}", c, i))).collect(),
            )
        })
        .collect();
    let index = TableIndex::Simple(Index::new(rows.iter().map(|&i| Value::from(i)).collect()));
    DataFrame::from_columns(columns, Some(index)).unwrap()
}

/// Keyed frame with `key` plus two text columns named after `names`
pub fn keyed(keys: &[&str], names: [&str; 2]) -> DataFrame {
    let column = |name: &str| -> Vec<Value> {
        (0..keys.len()).map(|i| Value::from(format!("{}{}", name, i))).collect()
    };
    DataFrame::from_columns(
        vec![
            ("key", keys.iter().map(|&k| Value::from(k)).collect()),
            (names[0], column(names[0])),
            (names[1], column(names[1])),
        ],
        None,
    )
    .unwrap()
}

/// Temporary directory removed on drop, plus a path inside it
pub fn temp_file(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}
