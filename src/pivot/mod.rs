//! Pivot tables

use std::collections::{BTreeMap, BTreeSet};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::groupby::AggFunc;
use crate::index::{Index, MultiIndex, TableIndex};
use crate::series::Series;
use crate::value::Value;

/// Builder for a pivot table over one frame
#[derive(Debug)]
pub struct PivotTable<'a> {
    /// Source frame
    df: &'a DataFrame,

    /// Column whose values are aggregated
    values: String,

    /// Columns forming the row index
    index: Vec<String>,

    /// Column whose distinct values become the output columns
    columns: String,

    /// Aggregation applied per cell
    aggfunc: AggFunc,
}

impl<'a> PivotTable<'a> {
    pub fn new(df: &'a DataFrame, values: &str, index: &[&str], columns: &str) -> Result<Self> {
        if index.is_empty() {
            return Err(Error::InvalidInput("pivot table needs at least one index column".to_string()));
        }
        for name in index.iter().copied().chain([values, columns]) {
            if !df.contains_column(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }
        Ok(PivotTable {
            df,
            values: values.to_string(),
            index: index.iter().map(|s| s.to_string()).collect(),
            columns: columns.to_string(),
            aggfunc: AggFunc::Mean,
        })
    }

    /// Aggregation to use instead of the mean
    pub fn aggfunc(mut self, aggfunc: AggFunc) -> Self {
        self.aggfunc = aggfunc;
        self
    }

    /// Build the table.
    ///
    /// Row keys and column labels are sorted ascending; a cell with no source
    /// rows is missing. Source rows with a missing key are skipped.
    pub fn execute(&self) -> Result<DataFrame> {
        let value_cells = self.df.column_values(&self.values)?;
        if !self.aggfunc.accepts(self.df.get_column(&self.values)?.dtype()) {
            return Err(Error::TypeMismatch(format!(
                "{} is not supported for column '{}'",
                self.aggfunc.name(),
                self.values
            )));
        }
        let index_cells = self
            .index
            .iter()
            .map(|c| self.df.column_values(c))
            .collect::<Result<Vec<_>>>()?;
        let column_cells = self.df.column_values(&self.columns)?;

        let mut cells: BTreeMap<Vec<Value>, BTreeMap<Value, Vec<Value>>> = BTreeMap::new();
        let mut labels: BTreeSet<Value> = BTreeSet::new();
        for row in 0..self.df.row_count() {
            let key: Vec<Value> = index_cells.iter().map(|c| c[row].clone()).collect();
            let label = &column_cells[row];
            if label.is_na() || key.iter().any(Value::is_na) {
                continue;
            }
            labels.insert(label.clone());
            cells
                .entry(key)
                .or_default()
                .entry(label.clone())
                .or_default()
                .push(value_cells[row].clone());
        }

        let mut columns = Vec::with_capacity(labels.len());
        for label in &labels {
            let values = cells
                .values()
                .map(|by_label| match by_label.get(label) {
                    Some(group) => self.aggfunc.apply(&Series::new(group.clone(), None)),
                    None => Ok(Value::NA),
                })
                .collect::<Result<Vec<_>>>()?;
            columns.push((label.to_string(), values));
        }

        let keys: Vec<Vec<Value>> = cells.into_keys().collect();
        let index = if self.index.len() == 1 {
            TableIndex::Simple(Index::with_name(
                keys.into_iter().filter_map(|k| k.into_iter().next()).collect(),
                Some(self.index[0].clone()),
            ))
        } else {
            let names = self.index.iter().cloned().map(Some).collect();
            TableIndex::Multi(MultiIndex::from_keys(self.index.len(), keys, Some(names))?)
        };
        log::debug!(
            "pivot_table of '{}' gives {} rows x {} columns",
            self.values,
            index.len(),
            columns.len()
        );
        DataFrame::from_columns(columns, Some(index))
    }
}

impl DataFrame {
    /// Pivot table with an explicit aggregation
    pub fn pivot_table(
        &self,
        values: &str,
        index: &[&str],
        columns: &str,
        aggfunc: AggFunc,
    ) -> Result<DataFrame> {
        PivotTable::new(self, values, index, columns)?
            .aggfunc(aggfunc)
            .execute()
    }

    /// Pivot table of means
    pub fn pivot_table_mean(&self, values: &str, index: &[&str], columns: &str) -> Result<DataFrame> {
        PivotTable::new(self, values, index, columns)?.execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;

    #[test]
    fn test_empty_cells_are_missing() {
        let df = DataFrame::from_columns(
            vec![
                ("A", cells!["foo", "foo", "foo", "bar", "bar", "bar"]),
                ("B", cells!["one", "one", "two", "two", "one", "one"]),
                ("C", cells!["x", "y", "x", "y", "x", "y"]),
                ("D", cells![1, 3, 2, 5, 4, 1]),
            ],
            None,
        )
        .unwrap();
        let pivot = df.pivot_table_mean("D", &["A", "B"], "C").unwrap();
        assert_eq!(pivot.shape(), (4, 2));
        // rows: (bar, one), (bar, two), (foo, one), (foo, two)
        assert_eq!(
            pivot.column_values("x").unwrap(),
            &cells![4.0, Value::NA, 1.0, 2.0]
        );
        assert_eq!(
            pivot.column_values("y").unwrap(),
            &cells![1.0, 5.0, 3.0, Value::NA]
        );
    }
}
