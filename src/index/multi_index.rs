use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::index::{Index, TableIndex};
use crate::value::Value;

/// MultiIndex structure
///
/// Hierarchical row labels. Each level stores its distinct values in
/// first-appearance order and every row stores one code per level.
/// Duplicate tuples are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiIndex {
    /// Distinct labels of each level
    levels: Vec<Vec<Value>>,

    /// Per level, the position into `levels[level]` for every row
    codes: Vec<Vec<usize>>,

    /// Name of each level
    names: Vec<Option<String>>,
}

impl MultiIndex {
    /// Create a new MultiIndex
    ///
    /// # Arguments
    /// * `levels` - distinct values of each level
    /// * `codes` - for each level, the index into that level for every row
    /// * `names` - optional names, one per level
    pub fn new(
        levels: Vec<Vec<Value>>,
        codes: Vec<Vec<usize>>,
        names: Option<Vec<Option<String>>>,
    ) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::InvalidInput("a MultiIndex needs at least one level".into()));
        }

        if levels.len() != codes.len() {
            return Err(Error::LengthMismatch {
                expected: levels.len(),
                actual: codes.len(),
            });
        }

        for (level_idx, level_codes) in codes.iter().enumerate() {
            let n_values = levels[level_idx].len();
            if let Some(&bad) = level_codes.iter().find(|&&c| c >= n_values) {
                return Err(Error::IndexOutOfBounds {
                    index: bad as isize,
                    size: n_values,
                });
            }
        }

        let n_rows = codes[0].len();
        for level_codes in &codes {
            if level_codes.len() != n_rows {
                return Err(Error::LengthMismatch {
                    expected: n_rows,
                    actual: level_codes.len(),
                });
            }
        }

        let names = match names {
            Some(n) => {
                if n.len() != levels.len() {
                    return Err(Error::LengthMismatch {
                        expected: levels.len(),
                        actual: n.len(),
                    });
                }
                n
            }
            None => vec![None; levels.len()],
        };

        Ok(MultiIndex { levels, codes, names })
    }

    /// A MultiIndex with `n_levels` levels and no rows
    pub fn empty(n_levels: usize, names: Option<Vec<Option<String>>>) -> Result<Self> {
        MultiIndex::new(vec![Vec::new(); n_levels], vec![Vec::new(); n_levels], names)
    }

    /// Build from a list of `n_levels`-long tuples; an empty list gives an empty index
    pub fn from_keys(
        n_levels: usize,
        tuples: Vec<Vec<Value>>,
        names: Option<Vec<Option<String>>>,
    ) -> Result<Self> {
        if tuples.is_empty() {
            return MultiIndex::empty(n_levels, names);
        }
        MultiIndex::from_tuples(tuples, names)
    }

    /// Build from a list of equal-length tuples
    pub fn from_tuples(tuples: Vec<Vec<Value>>, names: Option<Vec<Option<String>>>) -> Result<Self> {
        let n_levels = match tuples.first() {
            Some(first) => first.len(),
            None => return Err(Error::InvalidInput("empty tuple list".into())),
        };

        for tuple in &tuples {
            if tuple.len() != n_levels {
                return Err(Error::LengthMismatch {
                    expected: n_levels,
                    actual: tuple.len(),
                });
            }
        }

        let mut levels: Vec<Vec<Value>> = vec![Vec::new(); n_levels];
        let mut level_maps: Vec<HashMap<Value, usize>> = vec![HashMap::new(); n_levels];
        let mut codes: Vec<Vec<usize>> = vec![Vec::with_capacity(tuples.len()); n_levels];

        for tuple in &tuples {
            for (level_idx, value) in tuple.iter().enumerate() {
                let code = match level_maps[level_idx].get(value) {
                    Some(&code) => code,
                    None => {
                        let new_code = levels[level_idx].len();
                        levels[level_idx].push(value.clone());
                        level_maps[level_idx].insert(value.clone(), new_code);
                        new_code
                    }
                };
                codes[level_idx].push(code);
            }
        }

        MultiIndex::new(levels, codes, names)
    }

    /// Build from one array per level, zipped row-wise
    pub fn from_arrays(arrays: Vec<Vec<Value>>, names: Option<Vec<Option<String>>>) -> Result<Self> {
        let n_rows = arrays.first().map(|a| a.len()).unwrap_or(0);
        for array in &arrays {
            if array.len() != n_rows {
                return Err(Error::LengthMismatch {
                    expected: n_rows,
                    actual: array.len(),
                });
            }
        }
        let tuples = (0..n_rows)
            .map(|row| arrays.iter().map(|a| a[row].clone()).collect())
            .collect();
        MultiIndex::from_keys(arrays.len(), tuples, names)
    }

    /// Tuple at a position
    pub fn get_tuple(&self, pos: usize) -> Option<Vec<Value>> {
        if pos >= self.len() {
            return None;
        }
        Some(
            self.codes
                .iter()
                .zip(&self.levels)
                .map(|(level_codes, level)| level[level_codes[pos]].clone())
                .collect(),
        )
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.codes.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[Vec<Value>] {
        &self.levels
    }

    pub fn codes(&self) -> &[Vec<usize>] {
        &self.codes
    }

    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Set the level names
    pub fn set_names(&mut self, names: Vec<Option<String>>) -> Result<()> {
        if names.len() != self.levels.len() {
            return Err(Error::LengthMismatch {
                expected: self.levels.len(),
                actual: names.len(),
            });
        }
        self.names = names;
        Ok(())
    }

    /// Labels of one level for every row
    pub fn get_level_values(&self, level: usize) -> Result<Index> {
        let level_codes = self.codes.get(level).ok_or(Error::IndexOutOfBounds {
            index: level as isize,
            size: self.levels.len(),
        })?;
        let values = level_codes
            .iter()
            .map(|&c| self.levels[level][c].clone())
            .collect();
        Ok(Index::with_name(values, self.names[level].clone()))
    }

    /// Rows whose leading levels equal `prefix`, component-wise
    pub fn positions_of_prefix(&self, prefix: &[Value]) -> Vec<usize> {
        if prefix.is_empty() || prefix.len() > self.n_levels() {
            return Vec::new();
        }
        let mut wanted = Vec::with_capacity(prefix.len());
        for (level, value) in prefix.iter().enumerate() {
            match self.levels[level].iter().position(|v| v == value) {
                Some(code) => wanted.push(code),
                None => return Vec::new(),
            }
        }
        (0..self.len())
            .filter(|&row| {
                wanted
                    .iter()
                    .enumerate()
                    .all(|(level, &code)| self.codes[level][row] == code)
            })
            .collect()
    }

    /// Rows where a single level equals `value`
    pub fn xs_positions(&self, value: &Value, level: usize) -> Result<Vec<usize>> {
        let level_values = self.levels.get(level).ok_or(Error::IndexOutOfBounds {
            index: level as isize,
            size: self.levels.len(),
        })?;
        let code = match level_values.iter().position(|v| v == value) {
            Some(code) => code,
            None => return Ok(Vec::new()),
        };
        Ok(self.codes[level]
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == code)
            .map(|(row, _)| row)
            .collect())
    }

    /// Sub-index at the given positions; levels are kept as they are
    pub fn take(&self, positions: &[usize]) -> Self {
        let codes = self
            .codes
            .iter()
            .map(|level_codes| {
                positions
                    .iter()
                    .filter_map(|&p| level_codes.get(p).copied())
                    .collect()
            })
            .collect();
        MultiIndex {
            levels: self.levels.clone(),
            codes,
            names: self.names.clone(),
        }
    }

    /// Rows of `self` followed by rows of `other`
    pub fn append(&self, other: &MultiIndex) -> Result<Self> {
        if self.n_levels() != other.n_levels() {
            return Err(Error::LengthMismatch {
                expected: self.n_levels(),
                actual: other.n_levels(),
            });
        }
        let tuples = (0..self.len())
            .filter_map(|i| self.get_tuple(i))
            .chain((0..other.len()).filter_map(|i| other.get_tuple(i)))
            .collect();
        MultiIndex::from_keys(self.n_levels(), tuples, Some(self.names.clone()))
    }

    /// Remove the given levels. A single remaining level becomes a simple index.
    pub fn drop_levels(&self, drop: &[usize]) -> Result<TableIndex> {
        if let Some(&bad) = drop.iter().find(|&&l| l >= self.n_levels()) {
            return Err(Error::IndexOutOfBounds {
                index: bad as isize,
                size: self.n_levels(),
            });
        }
        let keep: Vec<usize> = (0..self.n_levels()).filter(|l| !drop.contains(l)).collect();
        match keep.as_slice() {
            [] => Err(Error::InvalidInput(
                "cannot drop every level of a MultiIndex".to_string(),
            )),
            [single] => Ok(TableIndex::Simple(self.get_level_values(*single)?)),
            _ => {
                let levels = keep.iter().map(|&l| self.levels[l].clone()).collect();
                let codes = keep.iter().map(|&l| self.codes[l].clone()).collect();
                let names = keep.iter().map(|&l| self.names[l].clone()).collect();
                Ok(TableIndex::Multi(MultiIndex::new(levels, codes, Some(names))?))
            }
        }
    }
}
