//! Label and position based selection

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::index::{resolve_position, Index, Label, TableIndex};
use crate::series::Series;
use crate::value::Value;

/// Result of a label lookup: one row, or every matching row in order
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Single(Series),
    Multiple(DataFrame),
}

impl Row {
    /// The single row, or an `AmbiguousKey` error naming the match count
    pub fn into_single(self) -> Result<Series> {
        match self {
            Row::Single(series) => Ok(series),
            Row::Multiple(df) => Err(Error::AmbiguousKey {
                key: df
                    .index()
                    .label(0)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                matches: df.row_count(),
            }),
        }
    }

    /// View the lookup as a frame; a single row becomes a one-row frame
    pub fn into_frame(self, columns: &[String]) -> Result<DataFrame> {
        match self {
            Row::Multiple(df) => Ok(df),
            Row::Single(series) => {
                let label = Value::from(series.name().cloned());
                let values = series.into_values();
                DataFrame::from_rows(
                    vec![values],
                    Some(TableIndex::Simple(Index::new(vec![label]))),
                    columns.to_vec(),
                )
            }
        }
    }
}

impl DataFrame {
    /// Row at a position as a Series indexed by column name
    fn row_series(&self, pos: usize) -> Result<Series> {
        let index = TableIndex::Simple(Index::new(
            self.column_names.iter().map(|n| Value::from(n.as_str())).collect(),
        ));
        let name = self.index.label(pos).map(|l| l.to_string());
        Series::with_index(self.row_values(pos), index, name)
    }

    /// Rows carrying a label.
    ///
    /// One match gives [`Row::Single`]. On a multi-level index a label with
    /// fewer components than levels selects on the leading levels and the
    /// matched levels are dropped from the result.
    pub fn at_label(&self, label: impl Into<Label>) -> Result<Row> {
        let label = label.into();
        let positions = self.index.positions_of(&label)?;
        if let TableIndex::Multi(idx) = &self.index {
            let depth = match &label {
                Label::Scalar(_) => 1,
                Label::Tuple(values) => values.len(),
            };
            if depth < idx.n_levels() {
                let mut df = self.take_rows(&positions);
                df.index = df.index.drop_leading_levels(depth)?;
                return Ok(Row::Multiple(df));
            }
        }
        match positions.as_slice() {
            [pos] => Ok(Row::Single(self.row_series(*pos)?)),
            _ => Ok(Row::Multiple(self.take_rows(&positions))),
        }
    }

    /// Rows whose leading index levels equal `prefix`. The matched levels
    /// are dropped unless the prefix covers every level.
    pub fn loc_prefix(&self, prefix: &[Value]) -> Result<DataFrame> {
        let positions = self.index.positions_of_prefix(prefix)?;
        let mut df = self.take_rows(&positions);
        if let TableIndex::Multi(idx) = &self.index {
            if prefix.len() < idx.n_levels() {
                df.index = df.index.drop_leading_levels(prefix.len())?;
            }
        }
        Ok(df)
    }

    /// Row at a position; negative positions count from the end
    pub fn at_position(&self, pos: isize) -> Result<Series> {
        let pos = resolve_position(pos, self.row_count())?;
        self.row_series(pos)
    }

    /// Single cell. Fails when the row label matches more than one row.
    pub fn at(&self, row: impl Into<Label>, column: &str) -> Result<Value> {
        let label = row.into();
        let values = self.column_values(column)?;
        let positions = self.index.positions_of(&label)?;
        match positions.as_slice() {
            [pos] => Ok(values[*pos].clone()),
            _ => Err(Error::AmbiguousKey {
                key: label.to_string(),
                matches: positions.len(),
            }),
        }
    }

    /// Sub-frame of the rows carrying any of `rows` and the listed columns.
    ///
    /// Rows are returned grouped by the requested label order; all
    /// duplicates of a label are included.
    pub fn loc(&self, rows: &[Label], columns: &[&str]) -> Result<DataFrame> {
        let mut positions = Vec::new();
        for label in rows {
            positions.extend(self.index.positions_of(label)?);
        }
        self.take_rows(&positions).select(columns)
    }

    /// Rows at the given positions; negative positions count from the end
    pub fn iloc_rows(&self, positions: &[isize]) -> Result<DataFrame> {
        let resolved = positions
            .iter()
            .map(|&p| resolve_position(p, self.row_count()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.take_rows(&resolved))
    }

    /// Cross-section: rows where `level` equals `value`, that level dropped
    pub fn xs(&self, value: impl Into<Value>, level: &str) -> Result<DataFrame> {
        let level = self.index.level_number(level)?;
        self.xs_level(value, level)
    }

    /// Cross-section by level number
    pub fn xs_level(&self, value: impl Into<Value>, level: usize) -> Result<DataFrame> {
        let positions = self.index.xs_positions(&value.into(), level)?;
        let mut df = self.take_rows(&positions);
        if self.index.is_multi() {
            df.index = df.index.drop_level(level)?;
        }
        Ok(df)
    }
}
