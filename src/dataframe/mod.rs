//! DataFrame: a two-dimensional labeled table
//!
//! Columns are ordered, uniquely named and all as long as the row index.
//! Operations return a new frame; the `*_inplace` variants mutate the
//! receiver and only do so after every check has passed.

pub mod concat;
mod display;
pub mod indexing;
pub mod join;
mod mask;
mod missing;
pub mod transform;

pub use concat::concat;
pub use indexing::Row;
pub use join::{merge, JoinType};

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::index::{Index, Label, MultiIndex, TableIndex};
use crate::series::Series;
use crate::value::{infer_dtype, DType, Value};

/// Axis selector: `Rows` is axis 0, `Columns` is axis 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

/// Build a `Vec<Value>` from literals of mixed cell types
#[macro_export]
macro_rules! cells {
    ($($x:expr),* $(,)?) => {
        vec![$($crate::value::Value::from($x)),*]
    };
}

/// Anything that can become a column of a given frame
pub trait IntoColumn {
    /// Produce exactly `index.len()` cells for the frame's rows
    fn into_column(self, index: &TableIndex) -> Result<Vec<Value>>;
}

impl IntoColumn for Vec<Value> {
    fn into_column(self, index: &TableIndex) -> Result<Vec<Value>> {
        if self.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: self.len(),
            });
        }
        Ok(self)
    }
}

impl IntoColumn for &Series {
    /// A series on the same labels is taken as is; otherwise it is aligned
    /// by label and rows it does not cover get NA.
    fn into_column(self, index: &TableIndex) -> Result<Vec<Value>> {
        if self.index().same_labels(index) {
            return Ok(self.values().to_vec());
        }
        if self.len() != index.len() && !index.is_multi() && !self.index().is_multi() {
            let covers_any = self
                .index()
                .labels()
                .iter()
                .any(|l| index.positions_of(l).is_ok());
            if !covers_any {
                return Err(Error::LengthMismatch {
                    expected: index.len(),
                    actual: self.len(),
                });
            }
        }
        let mut values = vec![Value::NA; index.len()];
        for (frame_pos, series_pos) in index.align(self.index()) {
            if let (Some(i), Some(j)) = (frame_pos, series_pos) {
                values[i] = self.values()[j].clone();
            }
        }
        Ok(values)
    }
}

impl IntoColumn for Series {
    fn into_column(self, index: &TableIndex) -> Result<Vec<Value>> {
        (&self).into_column(index)
    }
}

/// DataFrame structure
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    /// Column names in insertion order
    column_names: Vec<String>,

    /// Column data keyed by name
    columns: HashMap<String, Vec<Value>>,

    /// Row labels
    index: TableIndex,
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFrame {
    /// Empty frame with no rows and no columns
    pub fn new() -> Self {
        DataFrame {
            column_names: Vec::new(),
            columns: HashMap::new(),
            index: TableIndex::range(0),
        }
    }

    /// Build a frame from `(name, values)` pairs.
    ///
    /// Without an index, a 0-based positional index is used. Every column,
    /// and the index if given, must have the same length.
    pub fn from_columns<S: Into<String>>(
        columns: Vec<(S, Vec<Value>)>,
        index: Option<TableIndex>,
    ) -> Result<Self> {
        let columns: Vec<(String, Vec<Value>)> =
            columns.into_iter().map(|(n, v)| (n.into(), v)).collect();

        let n_rows = match (&index, columns.first()) {
            (Some(idx), _) => idx.len(),
            (None, Some((_, first))) => first.len(),
            (None, None) => 0,
        };

        let mut df = DataFrame {
            column_names: Vec::with_capacity(columns.len()),
            columns: HashMap::with_capacity(columns.len()),
            index: index.unwrap_or_else(|| TableIndex::range(n_rows)),
        };
        for (name, values) in columns {
            if values.len() != n_rows {
                return Err(Error::LengthMismatch {
                    expected: n_rows,
                    actual: values.len(),
                });
            }
            if df.columns.contains_key(&name) {
                return Err(Error::DuplicateColumnName(name));
            }
            df.column_names.push(name.clone());
            df.columns.insert(name, values);
        }
        Ok(df)
    }

    /// Build a frame from row-major data
    pub fn from_rows<S: Into<String>>(
        rows: Vec<Vec<Value>>,
        index: Option<TableIndex>,
        columns: Vec<S>,
    ) -> Result<Self> {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); names.len()];
        for row in rows {
            if row.len() != names.len() {
                return Err(Error::LengthMismatch {
                    expected: names.len(),
                    actual: row.len(),
                });
            }
            for (col, value) in row.into_iter().enumerate() {
                data[col].push(value);
            }
        }
        if names.is_empty() {
            return Ok(DataFrame {
                index: index.unwrap_or_else(|| TableIndex::range(0)),
                ..DataFrame::new()
            });
        }
        DataFrame::from_columns(names.into_iter().zip(data).collect(), index)
    }

    /// Frame of seeded standard-normal floats, for examples and benchmarks
    pub fn random_normal(index: TableIndex, columns: &[&str], seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_rows = index.len();
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(n_rows); columns.len()];
        // row-major draw order
        for _ in 0..n_rows {
            for column in data.iter_mut() {
                // Box-Muller transform; 1 - u keeps the log argument in (0, 1]
                let u1: f64 = 1.0 - rng.random::<f64>();
                let u2: f64 = rng.random::<f64>();
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
                column.push(Value::Float(z));
            }
        }
        DataFrame::from_columns(columns.iter().copied().zip(data).collect(), Some(index))
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> DataFrame {
        let positions: Vec<usize> = (0..n.min(self.row_count())).collect();
        self.take_rows(&positions)
    }

    /// Sub-frame with the listed columns in the listed order
    pub fn select(&self, columns: &[&str]) -> Result<DataFrame> {
        let mut selected = Vec::with_capacity(columns.len());
        for name in columns {
            selected.push((name.to_string(), self.column_values(name)?.to_vec()));
        }
        DataFrame::from_columns(selected, Some(self.index.clone()))
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Inferred type of every column, in column order
    pub fn dtypes(&self) -> Vec<(String, DType)> {
        self.column_names
            .iter()
            .map(|name| (name.clone(), infer_dtype(&self.columns[name])))
            .collect()
    }

    /// Raw cells of a column
    pub fn column_values(&self, name: &str) -> Result<&[Value]> {
        self.columns
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// A column as a Series sharing the row index
    pub fn get_column(&self, name: &str) -> Result<Series> {
        let values = self.column_values(name)?.to_vec();
        Series::with_index(values, self.index.clone(), Some(name.to_string()))
    }

    /// Cells of one row in column order
    pub(crate) fn row_values(&self, pos: usize) -> Vec<Value> {
        self.column_names
            .iter()
            .map(|name| self.columns[name][pos].clone())
            .collect()
    }

    /// New frame with the column added at the end, or replaced where it stands
    pub fn with_column<C: IntoColumn>(&self, name: &str, column: C) -> Result<DataFrame> {
        let mut df = self.clone();
        df.add_column_inplace(name, column)?;
        Ok(df)
    }

    /// Add or replace a column on this frame
    pub fn add_column_inplace<C: IntoColumn>(&mut self, name: &str, column: C) -> Result<()> {
        let values = column.into_column(&self.index)?;
        if !self.columns.contains_key(name) {
            self.column_names.push(name.to_string());
        }
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    /// New frame without the column
    pub fn drop_column(&self, name: &str) -> Result<DataFrame> {
        let mut df = self.clone();
        df.drop_column_inplace(name)?;
        Ok(df)
    }

    /// Remove a column from this frame
    pub fn drop_column_inplace(&mut self, name: &str) -> Result<()> {
        if self.columns.remove(name).is_none() {
            return Err(Error::ColumnNotFound(name.to_string()));
        }
        self.column_names.retain(|n| n != name);
        Ok(())
    }

    /// New frame without every row carrying `label`
    pub fn drop_row(&self, label: impl Into<Label>) -> Result<DataFrame> {
        let mut df = self.clone();
        df.drop_row_inplace(label)?;
        Ok(df)
    }

    /// Remove every row carrying `label` from this frame
    pub fn drop_row_inplace(&mut self, label: impl Into<Label>) -> Result<()> {
        let drop = self.index.positions_of(&label.into())?;
        let keep: Vec<usize> = (0..self.row_count()).filter(|p| !drop.contains(p)).collect();
        *self = self.take_rows(&keep);
        Ok(())
    }

    /// New frame with a column renamed
    pub fn rename_column(&self, old: &str, new: &str) -> Result<DataFrame> {
        if !self.contains_column(old) {
            return Err(Error::ColumnNotFound(old.to_string()));
        }
        if old != new && self.contains_column(new) {
            return Err(Error::DuplicateColumnName(new.to_string()));
        }
        let mut df = self.clone();
        if let Some(values) = df.columns.remove(old) {
            df.columns.insert(new.to_string(), values);
        }
        for n in df.column_names.iter_mut() {
            if n == old {
                *n = new.to_string();
            }
        }
        Ok(df)
    }

    /// New frame whose row index is the given one
    pub fn with_row_index(&self, index: TableIndex) -> Result<DataFrame> {
        if index.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                expected: self.row_count(),
                actual: index.len(),
            });
        }
        let mut df = self.clone();
        df.index = index;
        Ok(df)
    }

    /// Promote a column to the row index, removing it from the columns.
    /// Duplicate values are kept as duplicate labels.
    pub fn set_index(&self, column: &str) -> Result<DataFrame> {
        let mut df = self.clone();
        df.set_index_inplace(column)?;
        Ok(df)
    }

    /// In-place variant of [`DataFrame::set_index`]
    pub fn set_index_inplace(&mut self, column: &str) -> Result<()> {
        let values = self.column_values(column)?.to_vec();
        self.index = TableIndex::Simple(Index::with_name(values, Some(column.to_string())));
        self.drop_column_inplace(column)
    }

    /// Promote several columns to a multi-level index
    pub fn set_index_multi(&self, columns: &[&str]) -> Result<DataFrame> {
        if let [single] = columns {
            return self.set_index(single);
        }
        let arrays = columns
            .iter()
            .map(|c| self.column_values(c).map(|v| v.to_vec()))
            .collect::<Result<Vec<_>>>()?;
        let names = columns.iter().map(|c| Some(c.to_string())).collect();
        let index = MultiIndex::from_arrays(arrays, Some(names))?;
        let mut df = self.clone();
        for c in columns {
            df.drop_column_inplace(c)?;
        }
        df.index = TableIndex::Multi(index);
        Ok(df)
    }

    /// Move the index levels back into leading columns and use a positional index
    pub fn reset_index(&self) -> Result<DataFrame> {
        let mut level_columns: Vec<(String, Vec<Value>)> = Vec::new();
        match &self.index {
            TableIndex::Simple(idx) => {
                let name = idx.name().cloned().unwrap_or_else(|| "index".to_string());
                level_columns.push((name, idx.values().to_vec()));
            }
            TableIndex::Multi(idx) => {
                for level in 0..idx.n_levels() {
                    let values = idx.get_level_values(level)?;
                    let name = idx.names()[level]
                        .clone()
                        .unwrap_or_else(|| format!("level_{}", level));
                    level_columns.push((name, values.values().to_vec()));
                }
            }
        }
        for (name, _) in &level_columns {
            if self.contains_column(name) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
        }
        let mut columns = level_columns;
        for name in &self.column_names {
            columns.push((name.clone(), self.columns[name].clone()));
        }
        DataFrame::from_columns(columns, None)
    }

    /// Name the levels of the row index
    pub fn set_index_names(&mut self, names: Vec<Option<String>>) -> Result<()> {
        self.index.set_names(names)
    }

    /// Rows at the given positions, index included
    pub(crate) fn take_rows(&self, positions: &[usize]) -> DataFrame {
        let columns = self
            .column_names
            .iter()
            .map(|name| {
                let col = &self.columns[name];
                (name.clone(), positions.iter().map(|&p| col[p].clone()).collect())
            })
            .collect();
        DataFrame {
            column_names: self.column_names.clone(),
            columns,
            index: self.index.take(positions),
        }
    }
}
