//! Missing-data handling for DataFrame

use crate::dataframe::{Axis, DataFrame};
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

impl DataFrame {
    /// Boolean frame, true where the cell is missing
    pub fn is_null(&self) -> DataFrame {
        self.map_values(|v| Value::Bool(v.is_na()))
    }

    /// Boolean frame, true where the cell is present
    pub fn not_null(&self) -> DataFrame {
        self.map_values(|v| Value::Bool(v.is_value()))
    }

    /// Missing cells per column, in column order
    pub fn na_counts(&self) -> Vec<(String, usize)> {
        self.column_names
            .iter()
            .map(|name| {
                let count = self.columns[name].iter().filter(|v| v.is_na()).count();
                (name.clone(), count)
            })
            .collect()
    }

    /// Drop rows (or columns) with too few present values.
    ///
    /// A row or column is kept iff its count of present values is at least
    /// `threshold`. Without a threshold the full width is required, so any
    /// missing cell drops it.
    pub fn drop_na(&self, axis: Axis, threshold: Option<usize>) -> Result<DataFrame> {
        match axis {
            Axis::Rows => {
                let required = threshold.unwrap_or(self.column_count());
                let keep: Vec<usize> = (0..self.row_count())
                    .filter(|&row| {
                        let present = self
                            .column_names
                            .iter()
                            .filter(|name| self.columns[*name][row].is_value())
                            .count();
                        present >= required
                    })
                    .collect();
                log::debug!(
                    "drop_na(rows) kept {} of {} rows",
                    keep.len(),
                    self.row_count()
                );
                Ok(self.take_rows(&keep))
            }
            Axis::Columns => {
                let required = threshold.unwrap_or(self.row_count());
                let mut kept = Vec::new();
                for name in &self.column_names {
                    let present = self.columns[name].iter().filter(|v| v.is_value()).count();
                    if present >= required {
                        kept.push((name.clone(), self.columns[name].clone()));
                    }
                }
                DataFrame::from_columns(kept, Some(self.index.clone()))
            }
        }
    }

    /// Replace every missing cell with `fill`
    pub fn fill_na(&self, fill: &Value) -> DataFrame {
        self.map_values(|v| if v.is_na() { fill.clone() } else { v.clone() })
    }

    /// Replace missing cells column by column with a computed value,
    /// e.g. the column mean
    pub fn fill_na_with<F>(&self, f: F) -> Result<DataFrame>
    where
        F: Fn(&Series) -> Result<Value>,
    {
        let mut df = self.clone();
        for name in &self.column_names {
            let column = self.get_column(name)?;
            if !column.has_na() {
                continue;
            }
            let fill = f(&column)?;
            df.columns
                .insert(name.clone(), column.fill_na(&fill).into_values());
        }
        Ok(df)
    }

    /// In-place variant of [`DataFrame::fill_na`]
    pub fn fill_na_inplace(&mut self, fill: &Value) {
        for values in self.columns.values_mut() {
            for v in values.iter_mut().filter(|v| v.is_na()) {
                *v = fill.clone();
            }
        }
    }

    /// Fill the missing cells of one column only
    pub fn fill_na_column(&self, column: &str, fill: &Value) -> Result<DataFrame> {
        let filled = self.get_column(column)?.fill_na(fill);
        self.with_column(column, filled.into_values())
    }

    /// Rows with at least one missing cell in `column` removed
    pub fn drop_na_in(&self, column: &str) -> Result<DataFrame> {
        let values = self
            .columns
            .get(column)
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;
        let keep: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_value())
            .map(|(i, _)| i)
            .collect();
        Ok(self.take_rows(&keep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;

    #[test]
    fn test_threshold_keeps_rows_with_enough_values() {
        let df = DataFrame::from_columns(
            vec![
                ("A", cells![1.0, 2.0, f64::NAN]),
                ("B", cells![5.0, f64::NAN, f64::NAN]),
                ("C", cells![1, 2, 3]),
            ],
            None,
        )
        .unwrap();
        assert_eq!(df.drop_na(Axis::Rows, Some(2)).unwrap().row_count(), 2);
        assert_eq!(df.drop_na(Axis::Rows, Some(0)).unwrap().row_count(), 3);
        assert_eq!(df.drop_na(Axis::Rows, Some(4)).unwrap().row_count(), 0);
    }

    #[test]
    fn test_fill_with_column_mean() {
        let df = DataFrame::from_columns(vec![("A", cells![1.0, 2.0, f64::NAN])], None).unwrap();
        let filled = df.fill_na_with(|col| col.mean()).unwrap();
        assert_eq!(filled.column_values("A").unwrap(), &cells![1.0, 2.0, 1.5]);
    }
}
