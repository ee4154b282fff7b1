//! Grouped aggregation
//!
//! A [`GroupBy`] partitions the row positions of a frame by the values of
//! one or more key columns. Aggregates produce one row per group, ordered
//! by ascending key; rows whose key has a missing component are left out.

use std::collections::BTreeMap;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::index::{Index, Label, MultiIndex, TableIndex};
use crate::series::Series;
use crate::stats::{self, DescriptiveStats};
use crate::value::{DType, Value};

/// Aggregation function applied to each group of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Mean,
    Sum,
    /// Sample standard deviation
    Std,
    /// Sample variance
    Var,
    /// Present cells
    Count,
    /// Rows, missing included
    Size,
    Min,
    Max,
    /// First present cell
    First,
    /// Last present cell
    Last,
}

impl AggFunc {
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Mean => "mean",
            AggFunc::Sum => "sum",
            AggFunc::Std => "std",
            AggFunc::Var => "var",
            AggFunc::Count => "count",
            AggFunc::Size => "size",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::First => "first",
            AggFunc::Last => "last",
        }
    }

    /// Whether a column of this type takes part in the aggregate
    pub fn accepts(&self, dtype: DType) -> bool {
        match self {
            AggFunc::Mean | AggFunc::Sum | AggFunc::Std | AggFunc::Var => {
                dtype.is_numeric() || dtype == DType::Null
            }
            AggFunc::Min | AggFunc::Max => dtype != DType::Mixed,
            AggFunc::Count | AggFunc::Size | AggFunc::First | AggFunc::Last => true,
        }
    }

    /// Reduce one group of cells
    pub fn apply(&self, series: &Series) -> Result<Value> {
        match self {
            AggFunc::Mean => series.mean(),
            AggFunc::Sum => series.sum(),
            AggFunc::Std => series.std(),
            AggFunc::Var => series.var(),
            AggFunc::Count => Ok(Value::from(series.count())),
            AggFunc::Size => Ok(Value::from(series.len())),
            AggFunc::Min => series.min(),
            AggFunc::Max => series.max(),
            AggFunc::First => Ok(series
                .values()
                .iter()
                .find(|v| v.is_value())
                .cloned()
                .unwrap_or_default()),
            AggFunc::Last => Ok(series
                .values()
                .iter()
                .rev()
                .find(|v| v.is_value())
                .cloned()
                .unwrap_or_default()),
        }
    }
}

/// Grouping handle over a frame
#[derive(Debug)]
pub struct GroupBy<'a> {
    /// Grouped frame
    source: &'a DataFrame,

    /// Key column names
    keys: Vec<String>,

    /// Key tuple to row positions, in ascending key order
    groups: BTreeMap<Vec<Value>, Vec<usize>>,

    /// Key tuples in order of first appearance
    appearance: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Group rows by the values of one or more key columns
    pub fn group_by(&self, keys: &[&str]) -> Result<GroupBy<'_>> {
        GroupBy::new(self, keys)
    }
}

impl<'a> GroupBy<'a> {
    pub fn new(source: &'a DataFrame, keys: &[&str]) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::InvalidInput("group_by needs at least one key column".to_string()));
        }
        let key_columns = keys
            .iter()
            .map(|k| source.column_values(k))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
        let mut appearance = Vec::new();
        for row in 0..source.row_count() {
            let key: Vec<Value> = key_columns.iter().map(|c| c[row].clone()).collect();
            if key.iter().any(Value::is_na) {
                continue;
            }
            let positions = groups.entry(key.clone()).or_default();
            if positions.is_empty() {
                appearance.push(key);
            }
            positions.push(row);
        }
        log::debug!("group_by {:?}: {} groups", keys, groups.len());

        Ok(GroupBy {
            source,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            groups,
            appearance,
        })
    }

    /// Number of groups
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    fn to_label(&self, key: &[Value]) -> Label {
        match key {
            [single] if self.keys.len() == 1 => Label::Scalar(single.clone()),
            _ => Label::Tuple(key.to_vec()),
        }
    }

    /// Group labels in ascending order
    pub fn group_labels(&self) -> Vec<Label> {
        self.groups.keys().map(|k| self.to_label(k)).collect()
    }

    /// Group labels in order of first appearance
    pub fn groups_in_appearance_order(&self) -> Vec<Label> {
        self.appearance.iter().map(|k| self.to_label(k)).collect()
    }

    /// Row index of an aggregate: the keys, multi-level for several keys
    fn result_index(&self) -> Result<TableIndex> {
        let tuples: Vec<Vec<Value>> = self.groups.keys().cloned().collect();
        if self.keys.len() == 1 {
            let values = tuples.into_iter().filter_map(|t| t.into_iter().next()).collect();
            return Ok(TableIndex::Simple(Index::with_name(values, Some(self.keys[0].clone()))));
        }
        let names = self.keys.iter().cloned().map(Some).collect();
        Ok(TableIndex::Multi(MultiIndex::from_keys(self.keys.len(), tuples, Some(names))?))
    }

    /// Non-key columns in frame order
    fn value_columns(&self) -> Vec<&'a String> {
        self.source
            .column_names()
            .iter()
            .filter(|n| !self.keys.contains(n))
            .collect()
    }

    fn group_cells(&self, column: &str, positions: &[usize]) -> Result<Series> {
        let cells = self.source.column_values(column)?;
        Ok(Series::new(
            positions.iter().map(|&p| cells[p].clone()).collect(),
            Some(column.to_string()),
        ))
    }

    /// Apply one aggregate to every column that supports it.
    ///
    /// Columns of an unsupported type are left out of the result.
    pub fn agg(&self, func: AggFunc) -> Result<DataFrame> {
        let mut columns = Vec::new();
        for name in self.value_columns() {
            let dtype = self.source.get_column(name)?.dtype();
            if !func.accepts(dtype) {
                log::debug!("{} skips column '{}' of type {}", func.name(), name, dtype);
                continue;
            }
            let values = self
                .groups
                .values()
                .map(|positions| func.apply(&self.group_cells(name, positions)?))
                .collect::<Result<Vec<_>>>()?;
            columns.push((name.clone(), values));
        }
        DataFrame::from_columns(columns, Some(self.result_index()?))
    }

    /// Apply a chosen aggregate per column; the columns are output in the given order
    pub fn agg_columns(&self, aggs: &[(&str, AggFunc)]) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(aggs.len());
        for (name, func) in aggs {
            let dtype = self.source.get_column(name)?.dtype();
            if !func.accepts(dtype) {
                return Err(Error::TypeMismatch(format!(
                    "{} is not supported for column '{}' of type {}",
                    func.name(),
                    name,
                    dtype
                )));
            }
            let values = self
                .groups
                .values()
                .map(|positions| func.apply(&self.group_cells(name, positions)?))
                .collect::<Result<Vec<_>>>()?;
            columns.push((name.to_string(), values));
        }
        DataFrame::from_columns(columns, Some(self.result_index()?))
    }

    pub fn mean(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Mean)
    }

    pub fn sum(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Sum)
    }

    pub fn std(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Std)
    }

    pub fn var(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Var)
    }

    /// Present cells per group, for every non-key column
    pub fn count(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Count)
    }

    pub fn min(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Min)
    }

    pub fn max(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Max)
    }

    pub fn first(&self) -> Result<DataFrame> {
        self.agg(AggFunc::First)
    }

    pub fn last(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Last)
    }

    /// Rows per group
    pub fn size(&self) -> Result<Series> {
        let values = self.groups.values().map(|p| Value::from(p.len())).collect();
        Series::with_index(values, self.result_index()?, Some("size".to_string()))
    }

    /// Summary statistics per group, one `{column}_{stat}` column per numeric
    /// column and statistic
    pub fn describe(&self) -> Result<DataFrame> {
        let mut columns = Vec::new();
        for name in self.value_columns() {
            if !self.source.get_column(name)?.dtype().is_numeric() {
                continue;
            }
            let mut per_stat: Vec<Vec<Value>> =
                vec![Vec::with_capacity(self.n_groups()); DescriptiveStats::LABELS.len()];
            for positions in self.groups.values() {
                let data: Vec<f64> = self
                    .group_cells(name, positions)?
                    .values()
                    .iter()
                    .filter_map(Value::as_f64)
                    .collect();
                for (slot, v) in per_stat.iter_mut().zip(stats::describe_cells(&data)) {
                    slot.push(v);
                }
            }
            for (stat, values) in DescriptiveStats::LABELS.iter().zip(per_stat) {
                columns.push((format!("{}_{}", name, stat), values));
            }
        }
        DataFrame::from_columns(columns, Some(self.result_index()?))
    }

    /// Rows of one group with their original labels
    pub fn get_group(&self, key: impl Into<Label>) -> Result<DataFrame> {
        let label = key.into();
        let tuple = match &label {
            Label::Scalar(v) => vec![v.clone()],
            Label::Tuple(values) => values.clone(),
        };
        let positions = self
            .groups
            .get(&tuple)
            .ok_or_else(|| Error::KeyNotFound(label.to_string()))?;
        Ok(self.source.take_rows(positions))
    }
}
