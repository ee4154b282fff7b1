mod multi_index;

pub use multi_index::MultiIndex;

use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Display};
use std::ops::Range;

use crate::error::{Error, Result};
use crate::value::Value;

/// Index structure
///
/// Row labels of a DataFrame or Series. Labels need not be unique; a lookup
/// returns every position carrying the label.
#[derive(Debug, Clone)]
pub struct Index {
    /// Index values
    values: Vec<Value>,

    /// Value to positions, in ascending position order
    map: HashMap<Value, Vec<usize>>,

    /// Optional index name
    name: Option<String>,
}

impl Index {
    /// Create a new index
    pub fn new(values: Vec<Value>) -> Self {
        Self::with_name(values, None)
    }

    /// Create a named index
    pub fn with_name(values: Vec<Value>, name: Option<String>) -> Self {
        let mut map: HashMap<Value, Vec<usize>> = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            map.entry(value.clone()).or_default().push(i);
        }
        Index { values, map, name }
    }

    /// Create a positional index from an integer range
    pub fn from_range(range: Range<usize>) -> Self {
        Index::new(range.map(Value::from).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every position holding `key`, or `None` when absent
    pub fn get_locs(&self, key: &Value) -> Option<&[usize]> {
        self.map.get(key).map(|v| v.as_slice())
    }

    /// Value at a position
    pub fn get_value(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Copy of the index under a new name
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut new_index = self.clone();
        new_index.name = name;
        new_index
    }

    /// True when no label occurs twice
    pub fn is_unique(&self) -> bool {
        self.map.len() == self.values.len()
    }

    /// Labels at the given positions, in that order
    pub fn take(&self, positions: &[usize]) -> Self {
        let values = positions
            .iter()
            .filter_map(|&p| self.values.get(p).cloned())
            .collect();
        Index::with_name(values, self.name.clone())
    }

    /// This index followed by `other`; duplicates are kept
    pub fn append(&self, other: &Index) -> Self {
        let mut values = self.values.clone();
        values.extend(other.values.iter().cloned());
        let name = if self.name == other.name {
            self.name.clone()
        } else {
            None
        };
        Index::with_name(values, name)
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.name == other.name
    }
}

/// A row label: one value, or one value per level of a multi-level index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Scalar(Value),
    Tuple(Vec<Value>),
}

impl Label {
    /// Render as a column name, used when labels become column labels
    pub fn to_column_name(&self) -> String {
        self.to_string()
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Scalar(v) => write!(f, "{}", v),
            Label::Tuple(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

impl From<Value> for Label {
    fn from(v: Value) -> Self {
        Label::Scalar(v)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Scalar(Value::from(v))
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::Scalar(Value::from(v))
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Scalar(Value::Int(v))
    }
}

impl From<i32> for Label {
    fn from(v: i32) -> Self {
        Label::Scalar(Value::from(v))
    }
}

impl From<Vec<Value>> for Label {
    fn from(values: Vec<Value>) -> Self {
        Label::Tuple(values)
    }
}

/// Translate a possibly negative position into `0..len`
pub(crate) fn resolve_position(pos: isize, len: usize) -> Result<usize> {
    let size = len as isize;
    if pos >= size || pos < -size {
        return Err(Error::IndexOutOfBounds { index: pos, size: len });
    }
    Ok(if pos < 0 { (size + pos) as usize } else { pos as usize })
}

/// Index carried by a DataFrame or Series
#[derive(Debug, Clone, PartialEq)]
pub enum TableIndex {
    /// Single-level index
    Simple(Index),
    /// Multi-level index
    Multi(MultiIndex),
}

impl TableIndex {
    /// Default 0-based positional index
    pub fn range(len: usize) -> Self {
        TableIndex::Simple(Index::from_range(0..len))
    }

    /// Build an index from labels: all scalars give a simple index, all tuples a multi-level one
    pub fn from_labels(labels: Vec<Label>, names: Vec<Option<String>>) -> Result<Self> {
        if labels.iter().all(|l| matches!(l, Label::Scalar(_))) {
            let values = labels
                .into_iter()
                .filter_map(|l| match l {
                    Label::Scalar(v) => Some(v),
                    Label::Tuple(_) => None,
                })
                .collect();
            return Ok(TableIndex::Simple(Index::with_name(
                values,
                names.into_iter().next().flatten(),
            )));
        }
        let tuples = labels
            .into_iter()
            .map(|l| match l {
                Label::Tuple(values) => Ok(values),
                Label::Scalar(v) => Err(Error::InvalidInput(format!(
                    "cannot mix scalar label '{}' with tuple labels",
                    v
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        let names = if names.is_empty() { None } else { Some(names) };
        Ok(TableIndex::Multi(MultiIndex::from_tuples(tuples, names)?))
    }

    pub fn len(&self) -> usize {
        match self {
            TableIndex::Simple(idx) => idx.len(),
            TableIndex::Multi(idx) => idx.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, TableIndex::Multi(_))
    }

    /// Label at a position
    pub fn label(&self, pos: usize) -> Option<Label> {
        match self {
            TableIndex::Simple(idx) => idx.get_value(pos).cloned().map(Label::Scalar),
            TableIndex::Multi(idx) => idx.get_tuple(pos).map(Label::Tuple),
        }
    }

    /// All labels in order
    pub fn labels(&self) -> Vec<Label> {
        (0..self.len()).filter_map(|i| self.label(i)).collect()
    }

    /// Labels for a sequence of positions; negative positions count from the end
    pub fn labels_at(&self, positions: &[isize]) -> Result<Vec<Label>> {
        positions
            .iter()
            .map(|&p| {
                let pos = resolve_position(p, self.len())?;
                self.label(pos)
                    .ok_or(Error::IndexOutOfBounds { index: p, size: self.len() })
            })
            .collect()
    }

    /// Every position whose label matches.
    ///
    /// On a multi-level index a scalar matches the first level and a tuple
    /// matches as a prefix.
    pub fn positions_of(&self, label: &Label) -> Result<Vec<usize>> {
        let positions = match (self, label) {
            (TableIndex::Simple(idx), Label::Scalar(v)) => {
                idx.get_locs(v).map(|p| p.to_vec()).unwrap_or_default()
            }
            (TableIndex::Simple(_), Label::Tuple(_)) => Vec::new(),
            (TableIndex::Multi(idx), Label::Scalar(v)) => {
                idx.positions_of_prefix(std::slice::from_ref(v))
            }
            (TableIndex::Multi(idx), Label::Tuple(values)) => idx.positions_of_prefix(values),
        };
        if positions.is_empty() {
            return Err(Error::KeyNotFound(label.to_string()));
        }
        Ok(positions)
    }

    /// Positions whose leading levels equal `prefix`
    pub fn positions_of_prefix(&self, prefix: &[Value]) -> Result<Vec<usize>> {
        self.positions_of(&Label::Tuple(prefix.to_vec()))
            .or_else(|e| match (self, prefix) {
                (TableIndex::Simple(_), [single]) => {
                    self.positions_of(&Label::Scalar(single.clone()))
                }
                _ => Err(e),
            })
    }

    /// Cross-section: positions where one level equals `value`, other levels ignored
    pub fn xs_positions(&self, value: &Value, level: usize) -> Result<Vec<usize>> {
        let positions = match self {
            TableIndex::Simple(idx) if level == 0 => {
                idx.get_locs(value).map(|p| p.to_vec()).unwrap_or_default()
            }
            TableIndex::Simple(_) => {
                return Err(Error::InvalidInput(format!(
                    "level {} does not exist on a single-level index",
                    level
                )))
            }
            TableIndex::Multi(idx) => idx.xs_positions(value, level)?,
        };
        if positions.is_empty() {
            return Err(Error::KeyNotFound(value.to_string()));
        }
        Ok(positions)
    }

    /// Resolve a level name to its number
    pub fn level_number(&self, name: &str) -> Result<usize> {
        self.names()
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .ok_or_else(|| Error::KeyNotFound(format!("level '{}'", name)))
    }

    /// Sub-index at the given positions
    pub fn take(&self, positions: &[usize]) -> Self {
        match self {
            TableIndex::Simple(idx) => TableIndex::Simple(idx.take(positions)),
            TableIndex::Multi(idx) => TableIndex::Multi(idx.take(positions)),
        }
    }

    /// This index followed by `other`
    pub fn append(&self, other: &TableIndex) -> Result<Self> {
        match (self, other) {
            (TableIndex::Simple(a), TableIndex::Simple(b)) => Ok(TableIndex::Simple(a.append(b))),
            (TableIndex::Multi(a), TableIndex::Multi(b)) => Ok(TableIndex::Multi(a.append(b)?)),
            _ => Err(Error::InvalidInput(
                "cannot append a multi-level index to a single-level index".to_string(),
            )),
        }
    }

    /// One name per level
    pub fn names(&self) -> Vec<Option<String>> {
        match self {
            TableIndex::Simple(idx) => vec![idx.name().cloned()],
            TableIndex::Multi(idx) => idx.names().to_vec(),
        }
    }

    /// Replace the level names; the count must match the number of levels
    pub fn set_names(&mut self, names: Vec<Option<String>>) -> Result<()> {
        match self {
            TableIndex::Simple(idx) => {
                if names.len() != 1 {
                    return Err(Error::LengthMismatch { expected: 1, actual: names.len() });
                }
                idx.set_name(names.into_iter().next().flatten());
                Ok(())
            }
            TableIndex::Multi(idx) => idx.set_names(names),
        }
    }

    /// Remove the leading `n` levels of a multi-level index
    pub fn drop_leading_levels(&self, n: usize) -> Result<Self> {
        match self {
            TableIndex::Simple(_) if n == 0 => Ok(self.clone()),
            TableIndex::Simple(_) => Err(Error::InvalidInput(
                "cannot drop levels of a single-level index".to_string(),
            )),
            TableIndex::Multi(idx) => idx.drop_levels(&(0..n).collect::<Vec<_>>()),
        }
    }

    /// Remove one level of a multi-level index
    pub fn drop_level(&self, level: usize) -> Result<Self> {
        match self {
            TableIndex::Simple(_) => Err(Error::InvalidInput(
                "cannot drop the only level of a single-level index".to_string(),
            )),
            TableIndex::Multi(idx) => idx.drop_levels(&[level]),
        }
    }

    /// True when both indexes hold the same labels in the same order
    pub fn same_labels(&self, other: &TableIndex) -> bool {
        match (self, other) {
            (TableIndex::Simple(a), TableIndex::Simple(b)) => a.values() == b.values(),
            _ => self.len() == other.len() && self.labels() == other.labels(),
        }
    }

    /// Pair up positions of two indexes by (label, occurrence).
    ///
    /// Left positions come first in left order, followed by right positions
    /// whose label had no partner on the left.
    pub fn align(&self, other: &TableIndex) -> Vec<(Option<usize>, Option<usize>)> {
        if self.same_labels(other) {
            return (0..self.len()).map(|i| (Some(i), Some(i))).collect();
        }

        let right_labels = other.labels();
        let mut slots: HashMap<&Label, VecDeque<usize>> = HashMap::new();
        for (j, label) in right_labels.iter().enumerate() {
            slots.entry(label).or_default().push_back(j);
        }

        let mut used = vec![false; right_labels.len()];
        let mut pairs = Vec::with_capacity(self.len().max(other.len()));
        for (i, label) in self.labels().iter().enumerate() {
            let partner = slots.get_mut(label).and_then(|q| q.pop_front());
            if let Some(j) = partner {
                used[j] = true;
            }
            pairs.push((Some(i), partner));
        }
        for (j, was_used) in used.iter().enumerate() {
            if !was_used {
                pairs.push((None, Some(j)));
            }
        }
        pairs
    }
}
