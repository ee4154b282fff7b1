//! tabrs: an in-memory labeled table engine
//!
//! Tables with aligned row indexing, boolean masking, missing-value
//! handling, grouped aggregation, merge/join/concat, pivoting, and
//! conversion to and from CSV, xlsx and HTML.

pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod index;
pub mod io;
pub mod pivot;
pub mod series;
pub mod stats;
pub mod value;

// Re-export commonly used types
pub use config::TableConfig;
pub use dataframe::{concat, merge, Axis, DataFrame, JoinType, Row};
pub use error::{Error, Result};
pub use groupby::{AggFunc, GroupBy};
pub use index::{Index, Label, MultiIndex, TableIndex};
pub use io::{decode, encode, Format, IoOptions, SheetSelector};
pub use pivot::PivotTable;
pub use series::Series;
pub use value::{DType, Value};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
