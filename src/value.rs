//! Cell values and missing-data semantics
//!
//! Every cell in a table is a [`Value`]. Missing data is the [`Value::NA`]
//! variant: it propagates through arithmetic, makes every comparison
//! predicate false, and is what `is_null`, `fill_na` and `drop_na` look for.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single tagged cell
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Missing value
    NA,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Column type inferred from the cells it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    /// Every cell is missing
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// Cells of incompatible types
    Mixed,
}

impl DType {
    /// Int and Float columns take part in numeric aggregates
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int | DType::Float)
    }

    /// Common type of two column types
    pub fn combine(self, other: DType) -> DType {
        match (self, other) {
            (a, b) if a == b => a,
            (DType::Null, other) | (other, DType::Null) => other,
            (DType::Int, DType::Float) | (DType::Float, DType::Int) => DType::Float,
            _ => DType::Mixed,
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Null => "null",
            DType::Bool => "bool",
            DType::Int => "int64",
            DType::Float => "float64",
            DType::Str => "str",
            DType::Mixed => "object",
        };
        write!(f, "{}", name)
    }
}

/// Infer the type of a column, ignoring missing cells
pub fn infer_dtype(values: &[Value]) -> DType {
    values
        .iter()
        .fold(DType::Null, |acc, value| acc.combine(value.dtype()))
}

impl Value {
    /// True for `NA` and for a float NaN
    pub fn is_na(&self) -> bool {
        match self {
            Value::NA => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Opposite of [`Value::is_na`]
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    pub fn dtype(&self) -> DType {
        match self {
            _ if self.is_na() => DType::Null,
            Value::Bool(_) => DType::Bool,
            Value::Int(_) => DType::Int,
            Value::Float(_) => DType::Float,
            Value::Str(_) => DType::Str,
            Value::NA => DType::Null,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_)) || matches!(self, Value::Float(v) if !v.is_nan())
    }

    /// Numeric view of the cell; `None` for missing, text and booleans
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => num_traits::cast(*v),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a text cell: empty and NaN-like tokens are missing, then
    /// integer, float and boolean are tried before falling back to text.
    pub fn parse(raw: &str) -> Value {
        let s = raw.trim();
        if s.is_empty() || matches!(s, "NaN" | "nan" | "NA" | "N/A" | "null" | "NULL" | "None") {
            return Value::NA;
        }
        if let Ok(v) = s.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = s.parse::<f64>() {
            return Value::from(v);
        }
        match s.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Str(s.to_string()),
        }
    }

    /// Order two present values of compatible types.
    ///
    /// Returns `Ok(None)` when either side is missing; text against a number
    /// (or any other incompatible pair) is a type mismatch.
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>> {
        if self.is_na() || other.is_na() {
            return Ok(None);
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
            (Value::Bool(a), Value::Bool(b)) => Ok(Some(a.cmp(b))),
            (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(x.partial_cmp(&y)),
                _ => Err(Error::TypeMismatch(format!(
                    "cannot compare {} with {}",
                    a.dtype(),
                    b.dtype()
                ))),
            },
        }
    }

    pub fn gt(&self, other: &Value) -> Result<bool> {
        Ok(self.compare(other)? == Some(Ordering::Greater))
    }

    pub fn ge(&self, other: &Value) -> Result<bool> {
        Ok(matches!(
            self.compare(other)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    pub fn lt(&self, other: &Value) -> Result<bool> {
        Ok(self.compare(other)? == Some(Ordering::Less))
    }

    pub fn le(&self, other: &Value) -> Result<bool> {
        Ok(matches!(
            self.compare(other)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Equality predicate; missing never equals anything, mismatched types are simply unequal
    pub fn eq_value(&self, other: &Value) -> bool {
        matches!(self.compare(other), Ok(Some(Ordering::Equal)))
    }

    /// Inequality predicate; false when either side is missing
    pub fn ne_value(&self, other: &Value) -> bool {
        if self.is_na() || other.is_na() {
            return false;
        }
        !self.eq_value(other)
    }

    /// Render with a fixed number of decimals for floats
    pub fn format_with(&self, precision: usize) -> String {
        match self {
            Value::Float(v) if !v.is_nan() => format!("{:.*}", precision, v),
            other => other.to_string(),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            _ if self.is_na() => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
            Value::NA => 0,
        }
    }

    fn arithmetic<F, G>(&self, other: &Value, op: &str, int_op: F, float_op: G) -> Result<Value>
    where
        F: Fn(i64, i64) -> Option<i64>,
        G: Fn(f64, f64) -> f64,
    {
        if self.is_na() || other.is_na() {
            return Ok(Value::NA);
        }
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(match int_op(*a, *b) {
                Some(v) => Value::Int(v),
                None => Value::from(float_op(*a as f64, *b as f64)),
            }),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(Value::from(float_op(x, y))),
                _ => Err(Error::TypeMismatch(format!(
                    "unsupported operand types for {}: {} and {}",
                    op,
                    a.dtype(),
                    b.dtype()
                ))),
            },
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NA
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        match num_traits::cast::<usize, i64>(v) {
            Some(i) => Value::Int(i),
            None => Value::Float(v as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Value::NA
        } else {
            Value::Float(v)
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::NA,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_na() => write!(f, "NA"),
            Value::Str(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_na() => write!(f, "NaN"),
            Value::Bool(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::NA => write!(f, "NaN"),
        }
    }
}

// Structural equality: NA equals NA so that tables and labels compare
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (a, b) if a.is_na() || b.is_na() => a.is_na() && b.is_na(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            _ if self.is_na() => 0u8.hash(state),
            Value::Bool(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Value::Int(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Value::Float(v) => {
                3u8.hash(state);
                // -0.0 == 0.0
                let bits = if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
                bits.hash(state);
            }
            Value::Str(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            Value::NA => 0u8.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order used for sorting and group keys: NA < Bool < numbers < text
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = self.type_rank().cmp(&other.type_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match (self, other) {
            (a, b) if a.is_na() && b.is_na() => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => unsigned_zero(*a).total_cmp(&unsigned_zero(*b)),
            (Value::Int(a), Value::Float(b)) => {
                (*a as f64).total_cmp(&unsigned_zero(*b)).then(Ordering::Less)
            }
            (Value::Float(a), Value::Int(b)) => {
                unsigned_zero(*a).total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            _ => Ordering::Equal,
        }
    }
}

// -0.0 == 0.0 under Eq, so the order must not separate them
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl<'a> Add for &'a Value {
    type Output = Result<Value>;

    fn add(self, other: Self) -> Self::Output {
        if let (Value::Str(a), Value::Str(b)) = (self, other) {
            return Ok(Value::Str(format!("{}{}", a, b)));
        }
        self.arithmetic(other, "+", i64::checked_add, |a, b| a + b)
    }
}

impl<'a> Sub for &'a Value {
    type Output = Result<Value>;

    fn sub(self, other: Self) -> Self::Output {
        self.arithmetic(other, "-", i64::checked_sub, |a, b| a - b)
    }
}

impl<'a> Mul for &'a Value {
    type Output = Result<Value>;

    fn mul(self, other: Self) -> Self::Output {
        self.arithmetic(other, "*", i64::checked_mul, |a, b| a * b)
    }
}

impl<'a> Div for &'a Value {
    type Output = Result<Value>;

    /// True division; dividing by zero gives NA
    fn div(self, other: Self) -> Self::Output {
        if other.as_f64() == Some(0.0) && self.is_numeric() {
            return Ok(Value::NA);
        }
        self.arithmetic(other, "/", |_, _| None, |a, b| a / b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_na_propagates_through_arithmetic() {
        let a = Value::Int(10);
        assert_eq!((&a + &Value::NA).unwrap(), Value::NA);
        assert_eq!((&Value::NA * &a).unwrap(), Value::NA);
        assert_eq!((&a / &Value::Int(0)).unwrap(), Value::NA);
        assert_eq!((&a / &Value::Int(4)).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_text_arithmetic_is_rejected() {
        let r = &Value::from("abc") - &Value::Int(1);
        assert!(matches!(r, Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_comparisons_with_na_are_false() {
        let na = Value::NA;
        let one = Value::Int(1);
        assert!(!na.gt(&one).unwrap());
        assert!(!na.le(&one).unwrap());
        assert!(!na.eq_value(&na));
        assert!(!na.ne_value(&one));
    }

    #[test]
    fn test_nan_is_normalized_to_na() {
        assert_eq!(Value::from(f64::NAN), Value::NA);
        assert!(Value::Float(f64::NAN).is_na());
    }

    #[test]
    fn test_parse_infers_types() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse(" 1.5 "), Value::Float(1.5));
        assert_eq!(Value::parse("TRUE"), Value::Bool(true));
        assert_eq!(Value::parse(""), Value::NA);
        assert_eq!(Value::parse("GOOG"), Value::from("GOOG"));
    }

    #[test]
    fn test_total_order() {
        let mut values = vec![
            Value::from("b"),
            Value::Float(1.5),
            Value::NA,
            Value::Int(1),
            Value::from("a"),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::NA,
                Value::Int(1),
                Value::Float(1.5),
                Value::from("a"),
                Value::from("b")
            ]
        );
    }

    #[test]
    fn test_signed_zero_orders_equal() {
        let (pos, neg) = (Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(pos, neg);
        assert_eq!(pos.cmp(&neg), Ordering::Equal);
        assert_eq!(neg.cmp(&Value::Int(0)), Value::Float(0.0).cmp(&Value::Int(0)));

        let mut keys = std::collections::BTreeMap::new();
        keys.insert(pos, 1);
        keys.insert(neg, 2);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_infer_dtype() {
        assert_eq!(infer_dtype(&[Value::Int(1), Value::Float(2.0)]), DType::Float);
        assert_eq!(infer_dtype(&[Value::NA, Value::NA]), DType::Null);
        assert_eq!(infer_dtype(&[Value::Int(1), Value::from("x")]), DType::Mixed);
    }
}
