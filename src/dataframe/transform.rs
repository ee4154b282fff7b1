//! Reshaping and whole-frame transformations

use std::cmp::Ordering;

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::index::{Index, TableIndex};
use crate::stats::{self, DescriptiveStats};
use crate::value::{infer_dtype, Value};

impl DataFrame {
    /// Swap rows and columns.
    ///
    /// Row labels become column names (stringified) and the old column
    /// names become the row index. Repeated row labels are rejected since
    /// column names must be unique.
    pub fn transpose(&self) -> Result<DataFrame> {
        let names: Vec<String> = self.index.labels().iter().map(|l| l.to_column_name()).collect();
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(pos, name)| (name, self.row_values(pos)))
            .collect();
        let index = TableIndex::Simple(Index::new(
            self.column_names.iter().map(|n| Value::from(n.as_str())).collect(),
        ));
        DataFrame::from_columns(columns, Some(index))
    }

    /// Rows ordered by one column. The sort is stable, missing cells go
    /// last in either direction, and each row keeps its label.
    pub fn sort_values(&self, column: &str, ascending: bool) -> Result<DataFrame> {
        let values = self.column_values(column)?;
        let mut order: Vec<usize> = (0..self.row_count()).collect();
        order.sort_by(|&a, &b| {
            let (x, y) = (&values[a], &values[b]);
            match (x.is_na(), y.is_na()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if ascending => x.cmp(y),
                (false, false) => y.cmp(x),
            }
        });
        Ok(self.take_rows(&order))
    }

    /// Rows ordered by their index labels
    pub fn sort_index(&self, ascending: bool) -> DataFrame {
        let labels = self.index.labels();
        let mut order: Vec<usize> = (0..self.row_count()).collect();
        order.sort_by(|&a, &b| {
            let ord = labels[a].cmp(&labels[b]);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        self.take_rows(&order)
    }

    /// New frame with `f` applied to every cell of one column
    pub fn apply_column<F>(&self, column: &str, f: F) -> Result<DataFrame>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        let mapped = self.get_column(column)?.try_apply(f)?;
        self.with_column(column, mapped.into_values())
    }

    /// Summary statistics of every numeric column.
    ///
    /// Rows are `count, mean, std, min, 25%, 50%, 75%, max`; quartiles are
    /// linearly interpolated.
    pub fn describe(&self) -> Result<DataFrame> {
        let mut columns = Vec::new();
        for name in &self.column_names {
            let cells = &self.columns[name];
            if !infer_dtype(cells).is_numeric() {
                continue;
            }
            let data: Vec<f64> = cells.iter().filter_map(Value::as_f64).collect();
            columns.push((name.clone(), stats::describe_cells(&data)));
        }
        let index = TableIndex::Simple(Index::new(
            DescriptiveStats::LABELS.iter().map(|&l| Value::from(l)).collect(),
        ));
        DataFrame::from_columns(columns, Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;

    #[test]
    fn test_sort_values_puts_missing_last() {
        let df = DataFrame::from_columns(vec![("A", cells![3, Value::NA, 1, 2])], None).unwrap();
        let sorted = df.sort_values("A", false).unwrap();
        assert_eq!(sorted.column_values("A").unwrap(), &cells![3, 2, 1, Value::NA]);
        assert_eq!(sorted.index().label(0), df.index().label(0));
    }

    #[test]
    fn test_transpose_swaps_axes() {
        let df = DataFrame::from_columns(vec![("A", cells![1, 2]), ("B", cells![3, 4])], None).unwrap();
        let t = df.transpose().unwrap();
        assert_eq!(t.column_names(), &["0", "1"]);
        assert_eq!(t.column_values("1").unwrap(), &cells![2, 4]);
        assert_eq!(t.transpose().unwrap().row_count(), 2);
    }

    #[test]
    fn test_describe_skips_text() {
        let df = DataFrame::from_columns(
            vec![("n", cells![1, 2, 3, 4]), ("s", cells!["a", "b", "c", "d"])],
            None,
        )
        .unwrap();
        let d = df.describe().unwrap();
        assert_eq!(d.column_names(), &["n"]);
        assert_eq!(d.at("mean", "n").unwrap(), Value::Float(2.5));
        assert_eq!(d.at("50%", "n").unwrap(), Value::Float(2.5));
    }
}
