mod missing;
mod ops;

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::index::{Index, Label, TableIndex};
use crate::stats;
use crate::value::{infer_dtype, DType, Value};

/// Series structure: one named column of values with its row index
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Cell values
    values: Vec<Value>,

    /// Row labels
    index: TableIndex,

    /// Optional name
    name: Option<String>,
}

impl Series {
    /// Create a Series with a default positional index
    pub fn new(values: Vec<Value>, name: Option<String>) -> Self {
        let index = TableIndex::range(values.len());
        Series { values, index, name }
    }

    /// Create a Series from anything convertible into cells
    pub fn from_vec<T: Into<Value>>(values: Vec<T>, name: Option<String>) -> Self {
        Series::new(values.into_iter().map(Into::into).collect(), name)
    }

    /// Create a Series with an explicit index
    pub fn with_index(values: Vec<Value>, index: TableIndex, name: Option<String>) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Series { values, index, name })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a position
    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn dtype(&self) -> DType {
        infer_dtype(&self.values)
    }

    /// Value under a label; fails when the label is absent or repeated
    pub fn at(&self, label: impl Into<Label>) -> Result<&Value> {
        let label = label.into();
        let positions = self.index.positions_of(&label)?;
        match positions.as_slice() {
            [pos] => Ok(&self.values[*pos]),
            _ => Err(Error::AmbiguousKey {
                key: label.to_string(),
                matches: positions.len(),
            }),
        }
    }

    /// Sub-series at the given positions
    pub fn take(&self, positions: &[usize]) -> Series {
        Series {
            values: positions.iter().map(|&p| self.values[p].clone()).collect(),
            index: self.index.take(positions),
            name: self.name.clone(),
        }
    }

    /// First `n` values
    pub fn head(&self, n: usize) -> Series {
        let positions: Vec<usize> = (0..n.min(self.len())).collect();
        self.take(&positions)
    }

    /// Apply a function to every cell
    pub fn apply<F>(&self, f: F) -> Series
    where
        F: Fn(&Value) -> Value,
    {
        Series {
            values: self.values.iter().map(f).collect(),
            index: self.index.clone(),
            name: self.name.clone(),
        }
    }

    /// Apply a fallible function to every cell
    pub fn try_apply<F>(&self, f: F) -> Result<Series>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        let values = self.values.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Series {
            values,
            index: self.index.clone(),
            name: self.name.clone(),
        })
    }

    /// Present numeric values; errors when the column holds anything else
    fn numeric_values(&self, op: &str) -> Result<Vec<f64>> {
        let dtype = self.dtype();
        if !(dtype.is_numeric() || dtype == DType::Null) {
            return Err(Error::TypeMismatch(format!(
                "{} is not supported for a {} column",
                op, dtype
            )));
        }
        Ok(self.values.iter().filter_map(Value::as_f64).collect())
    }

    /// Sum of present values. Integer columns stay integer.
    pub fn sum(&self) -> Result<Value> {
        let data = self.numeric_values("sum")?;
        if self.dtype() == DType::Int {
            let total = self
                .values
                .iter()
                .filter_map(|v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })
                .try_fold(0i64, |acc, v| acc.checked_add(v));
            if let Some(total) = total {
                return Ok(Value::Int(total));
            }
        }
        if data.is_empty() {
            return Ok(Value::Int(0));
        }
        Ok(Value::from(data.iter().sum::<f64>()))
    }

    /// Mean of present values, NA when there are none
    pub fn mean(&self) -> Result<Value> {
        Ok(stats::mean(&self.numeric_values("mean")?).into())
    }

    /// Sample standard deviation, NA with fewer than two values
    pub fn std(&self) -> Result<Value> {
        Ok(stats::std(&self.numeric_values("std")?).into())
    }

    /// Sample variance, NA with fewer than two values
    pub fn var(&self) -> Result<Value> {
        Ok(stats::variance(&self.numeric_values("var")?, 1).into())
    }

    /// Smallest present value; text compares lexicographically
    pub fn min(&self) -> Result<Value> {
        self.extreme(std::cmp::Ordering::Less)
    }

    /// Largest present value; text compares lexicographically
    pub fn max(&self) -> Result<Value> {
        self.extreme(std::cmp::Ordering::Greater)
    }

    fn extreme(&self, wanted: std::cmp::Ordering) -> Result<Value> {
        let mut best: Option<&Value> = None;
        for value in self.values.iter().filter(|v| v.is_value()) {
            best = match best {
                None => Some(value),
                Some(current) => match value.compare(current)? {
                    Some(ord) if ord == wanted => Some(value),
                    _ => Some(current),
                },
            };
        }
        Ok(best.cloned().unwrap_or(Value::NA))
    }

    /// Number of present values
    pub fn count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// Distinct values in order of first appearance, missing included once
    pub fn unique(&self) -> Vec<Value> {
        let mut seen = std::collections::HashSet::new();
        self.values
            .iter()
            .filter(|v| seen.insert((*v).clone()))
            .cloned()
            .collect()
    }

    /// Number of distinct present values
    pub fn nunique(&self) -> usize {
        self.unique().iter().filter(|v| v.is_value()).count()
    }

    /// Occurrences of each present value, most frequent first.
    ///
    /// Ties keep first-appearance order. The result is indexed by value.
    pub fn value_counts(&self) -> Series {
        let mut order: Vec<Value> = Vec::new();
        let mut counts: HashMap<Value, i64> = HashMap::new();
        for value in self.values.iter().filter(|v| v.is_value()) {
            let entry = counts.entry(value.clone()).or_insert_with(|| {
                order.push(value.clone());
                0
            });
            *entry += 1;
        }
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));

        let values = order.iter().map(|v| Value::Int(counts[v])).collect();
        let index = TableIndex::Simple(Index::with_name(order, self.name.clone()));
        Series {
            values,
            index,
            name: Some("count".to_string()),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.index.labels().iter().map(|l| l.to_string()).collect();
        let cells: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let cell_width = cells.iter().map(|c| c.len()).max().unwrap_or(0);
        for (label, cell) in labels.iter().zip(&cells) {
            writeln!(f, "{:<lw$}    {:>cw$}", label, cell, lw = label_width, cw = cell_width)?;
        }
        match &self.name {
            Some(name) => write!(f, "Name: {}, dtype: {}", name, self.dtype()),
            None => write!(f, "dtype: {}", self.dtype()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_keeps_integers() {
        let s = Series::from_vec(vec![1, 2, 3, 4], Some("col1".into()));
        assert_eq!(s.sum().unwrap(), Value::Int(10));
        assert_eq!(s.mean().unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_text_extremes_are_lexicographic() {
        let s = Series::from_vec(vec!["Sam", "Charlie"], None);
        assert_eq!(s.max().unwrap(), Value::from("Sam"));
        assert_eq!(s.min().unwrap(), Value::from("Charlie"));
        assert!(s.mean().is_err());
    }

    #[test]
    fn test_value_counts_order() {
        let s = Series::from_vec(vec![444, 555, 777, 444], Some("col2".into()));
        let counts = s.value_counts();
        assert_eq!(counts.values(), &[Value::Int(2), Value::Int(1), Value::Int(1)]);
        assert_eq!(counts.index().label(0), Some(Label::from(444)));
        assert_eq!(counts.index().label(1), Some(Label::from(555)));
        assert_eq!(s.nunique(), 3);
    }
}
