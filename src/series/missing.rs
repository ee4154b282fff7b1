use crate::series::Series;
use crate::value::Value;

impl Series {
    /// Number of missing cells
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// Number of present cells
    pub fn value_count(&self) -> usize {
        self.len() - self.na_count()
    }

    pub fn has_na(&self) -> bool {
        self.values.iter().any(Value::is_na)
    }

    /// Boolean series, true where the cell is missing
    pub fn is_null(&self) -> Series {
        self.apply(|v| Value::Bool(v.is_na()))
    }

    /// Boolean series, true where the cell is present
    pub fn not_null(&self) -> Series {
        self.apply(|v| Value::Bool(v.is_value()))
    }

    /// Remove missing cells, keeping the labels of the others
    pub fn drop_na(&self) -> Series {
        let keep: Vec<usize> = self
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_value())
            .map(|(i, _)| i)
            .collect();
        self.take(&keep)
    }

    /// Replace missing cells with `fill`
    pub fn fill_na(&self, fill: &Value) -> Series {
        self.apply(|v| if v.is_na() { fill.clone() } else { v.clone() })
    }
}
