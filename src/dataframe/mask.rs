//! Boolean frames, `where_mask` and row filtering

use std::collections::HashMap;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

impl DataFrame {
    /// Apply `f` to every cell, keeping shape and labels
    pub(crate) fn map_cells<F>(&self, f: F) -> Result<DataFrame>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        let mut columns = HashMap::with_capacity(self.columns.len());
        for name in &self.column_names {
            let mapped = self.columns[name]
                .iter()
                .map(&f)
                .collect::<Result<Vec<_>>>()?;
            columns.insert(name.clone(), mapped);
        }
        Ok(DataFrame {
            column_names: self.column_names.clone(),
            columns,
            index: self.index.clone(),
        })
    }

    /// Infallible variant of `map_cells`
    pub(crate) fn map_values<F>(&self, f: F) -> DataFrame
    where
        F: Fn(&Value) -> Value,
    {
        let columns = self
            .column_names
            .iter()
            .map(|name| (name.clone(), self.columns[name].iter().map(&f).collect()))
            .collect();
        DataFrame {
            column_names: self.column_names.clone(),
            columns,
            index: self.index.clone(),
        }
    }

    /// Boolean frame, `cell > other`; missing cells compare false
    pub fn gt(&self, other: &Value) -> Result<DataFrame> {
        self.map_cells(|v| v.gt(other).map(Value::Bool))
    }

    pub fn ge(&self, other: &Value) -> Result<DataFrame> {
        self.map_cells(|v| v.ge(other).map(Value::Bool))
    }

    pub fn lt(&self, other: &Value) -> Result<DataFrame> {
        self.map_cells(|v| v.lt(other).map(Value::Bool))
    }

    pub fn le(&self, other: &Value) -> Result<DataFrame> {
        self.map_cells(|v| v.le(other).map(Value::Bool))
    }

    pub fn eq_value(&self, other: &Value) -> DataFrame {
        self.map_values(|v| Value::Bool(v.eq_value(other)))
    }

    pub fn ne_value(&self, other: &Value) -> DataFrame {
        self.map_values(|v| Value::Bool(v.ne_value(other)))
    }

    /// Same shape as `self`; cells where the mask is false become missing.
    ///
    /// The mask must have the same row count and hold boolean cells. Rows
    /// are matched by label when the two indexes differ; a row or column
    /// the mask does not have is masked out entirely.
    pub fn where_mask(&self, mask: &DataFrame) -> Result<DataFrame> {
        if mask.row_count() != self.row_count() {
            return Err(Error::LengthMismatch {
                expected: self.row_count(),
                actual: mask.row_count(),
            });
        }
        // mask row for every row of `self`
        let mask_rows: Vec<Option<usize>> = if mask.index.same_labels(&self.index) {
            (0..self.row_count()).map(Some).collect()
        } else {
            let mut rows = vec![None; self.row_count()];
            for pair in self.index.align(&mask.index) {
                if let (Some(i), j) = pair {
                    rows[i] = j;
                }
            }
            rows
        };

        let mut columns = HashMap::with_capacity(self.columns.len());
        for name in &self.column_names {
            let source = &self.columns[name];
            let masked = match mask.columns.get(name) {
                Some(cells) => {
                    let flags = Series::new(cells.clone(), None).as_mask()?;
                    source
                        .iter()
                        .zip(&mask_rows)
                        .map(|(v, row)| match row {
                            Some(j) if flags[*j] => v.clone(),
                            _ => Value::NA,
                        })
                        .collect()
                }
                None => vec![Value::NA; source.len()],
            };
            columns.insert(name.clone(), masked);
        }
        Ok(DataFrame {
            column_names: self.column_names.clone(),
            columns,
            index: self.index.clone(),
        })
    }

    /// Rows where the mask is true, original order kept.
    ///
    /// A mask on the same labels is applied position by position; any
    /// other mask is aligned on the row index and unmatched rows are dropped.
    pub fn filter_rows(&self, mask: &Series) -> Result<DataFrame> {
        let flags = mask.as_mask()?;
        let keep: Vec<usize> = if mask.index().same_labels(&self.index) {
            flags
                .iter()
                .enumerate()
                .filter(|(_, k)| **k)
                .map(|(i, _)| i)
                .collect()
        } else {
            self.index
                .align(mask.index())
                .into_iter()
                .filter_map(|pair| match pair {
                    (Some(i), Some(j)) if flags[j] => Some(i),
                    _ => None,
                })
                .collect()
        };
        log::debug!("filter_rows kept {} of {} rows", keep.len(), self.row_count());
        Ok(self.take_rows(&keep))
    }
}
