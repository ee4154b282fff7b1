//! Element-wise comparison, logic and arithmetic for Series
//!
//! Binary operations between two series align on the row index first;
//! a label present on one side only pairs with a missing cell.

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};

use crate::error::{Error, Result};
use crate::index::TableIndex;
use crate::series::Series;
use crate::value::Value;

impl Series {
    fn compare_with<F>(&self, f: F) -> Result<Series>
    where
        F: Fn(&Value) -> Result<bool>,
    {
        self.try_apply(|v| f(v).map(Value::Bool))
    }

    /// `self > other`, false where missing
    pub fn gt(&self, other: &Value) -> Result<Series> {
        self.compare_with(|v| v.gt(other))
    }

    pub fn ge(&self, other: &Value) -> Result<Series> {
        self.compare_with(|v| v.ge(other))
    }

    pub fn lt(&self, other: &Value) -> Result<Series> {
        self.compare_with(|v| v.lt(other))
    }

    pub fn le(&self, other: &Value) -> Result<Series> {
        self.compare_with(|v| v.le(other))
    }

    pub fn eq_value(&self, other: &Value) -> Series {
        self.apply(|v| Value::Bool(v.eq_value(other)))
    }

    pub fn ne_value(&self, other: &Value) -> Series {
        self.apply(|v| Value::Bool(v.ne_value(other)))
    }

    /// True where the cell equals one of `candidates`
    pub fn isin(&self, candidates: &[Value]) -> Series {
        self.apply(|v| Value::Bool(candidates.iter().any(|c| v.eq_value(c))))
    }

    /// Read the series as a row mask: booleans as is, missing as false
    pub fn as_mask(&self) -> Result<Vec<bool>> {
        self.values
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Ok(*b),
                other if other.is_na() => Ok(false),
                other => Err(Error::TypeMismatch(format!(
                    "mask cells must be boolean, found {}",
                    other.dtype()
                ))),
            })
            .collect()
    }

    /// Combine two series cell by cell after aligning their indexes
    pub(crate) fn zip_aligned<F>(&self, other: &Series, f: F) -> Result<Series>
    where
        F: Fn(&Value, &Value) -> Result<Value>,
    {
        let pairs = self.index.align(&other.index);
        let mut values = Vec::with_capacity(pairs.len());
        for (l, r) in &pairs {
            let left = l.map(|i| &self.values[i]).unwrap_or(&Value::NA);
            let right = r.map(|j| &other.values[j]).unwrap_or(&Value::NA);
            values.push(f(left, right)?);
        }

        let index = if self.index.same_labels(&other.index) {
            self.index.clone()
        } else {
            let labels = pairs
                .iter()
                .filter_map(|(l, r)| match (l, r) {
                    (Some(i), _) => self.index.label(*i),
                    (None, Some(j)) => other.index.label(*j),
                    (None, None) => None,
                })
                .collect();
            TableIndex::from_labels(labels, self.index.names())?
        };

        let name = if self.name == other.name {
            self.name.clone()
        } else {
            None
        };
        Series::with_index(values, index, name)
    }

    /// Element-wise logical AND after alignment
    pub fn and(&self, other: &Series) -> Result<Series> {
        self.zip_aligned(other, |a, b| Ok(Value::Bool(mask_cell(a)? && mask_cell(b)?)))
    }

    /// Element-wise logical OR after alignment
    pub fn or(&self, other: &Series) -> Result<Series> {
        self.zip_aligned(other, |a, b| Ok(Value::Bool(mask_cell(a)? || mask_cell(b)?)))
    }

    /// Element-wise logical NOT; a missing cell stays missing
    pub fn not(&self) -> Result<Series> {
        self.try_apply(|v| match v {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other if other.is_na() => Ok(Value::NA),
            other => Err(Error::TypeMismatch(format!(
                "logical not on a {} cell",
                other.dtype()
            ))),
        })
    }
}

fn mask_cell(v: &Value) -> Result<bool> {
    match v {
        Value::Bool(b) => Ok(*b),
        other if other.is_na() => Ok(false),
        other => Err(Error::TypeMismatch(format!(
            "logical operators need boolean cells, found {}",
            other.dtype()
        ))),
    }
}

impl<'a> BitAnd for &'a Series {
    type Output = Result<Series>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<'a> BitOr for &'a Series {
    type Output = Result<Series>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<'a> Not for &'a Series {
    type Output = Result<Series>;

    fn not(self) -> Self::Output {
        Series::not(self)
    }
}

macro_rules! impl_arith {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait for &'a Series {
            type Output = Result<Series>;

            fn $method(self, rhs: Self) -> Self::Output {
                self.zip_aligned(rhs, |a, b| a.$method(b))
            }
        }
    };
}

impl_arith!(Add, add);
impl_arith!(Sub, sub);
impl_arith!(Mul, mul);
impl_arith!(Div, div);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Index, Label};

    #[test]
    fn test_compound_mask() {
        let col1 = Series::from_vec(vec![1, 2, 3, 4], Some("col1".into()));
        let col2 = Series::from_vec(vec![444, 555, 777, 444], Some("col2".into()));
        let mask = (&col1.gt(&Value::Int(2)).unwrap() & &col2.eq_value(&Value::Int(444))).unwrap();
        assert_eq!(mask.as_mask().unwrap(), vec![false, false, false, true]);
    }

    #[test]
    fn test_arithmetic_aligns_on_labels() {
        let idx_a = TableIndex::Simple(Index::new(vec!["x".into(), "y".into()]));
        let idx_b = TableIndex::Simple(Index::new(vec!["y".into(), "z".into()]));
        let a = Series::with_index(vec![1.into(), 2.into()], idx_a, None).unwrap();
        let b = Series::with_index(vec![10.into(), 20.into()], idx_b, None).unwrap();
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.values(), &[Value::NA, Value::Int(12), Value::NA]);
        assert_eq!(sum.index().label(2), Some(Label::from("z")));
    }

    #[test]
    fn test_logic_rejects_non_boolean() {
        let a = Series::from_vec(vec![1, 2], None);
        let b = Series::from_vec(vec![true, false], None);
        assert!(matches!(&a & &b, Err(Error::TypeMismatch(_))));
    }
}
