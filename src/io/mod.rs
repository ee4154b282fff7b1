//! Conversion between frames and external byte formats
//!
//! Every adapter works from rows of text: decoders hand text rows to
//! [`frame_from_text`], which infers a type per column, and encoders take
//! rows from [`text_rows`]. [`decode`] and [`encode`] pick the adapter
//! from a [`Format`].

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod html;

pub use self::csv::{read_csv, read_csv_from_reader, write_csv, write_csv_to_writer};
#[cfg(feature = "excel")]
pub use excel::{list_sheet_names, read_excel, read_excel_from_bytes, write_excel, write_excel_sheets};
pub use html::{read_html, to_html};

use std::collections::HashMap;

use crate::config::TableConfig;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::index::{Index, TableIndex};
use crate::value::{infer_dtype, DType, Value};

/// External format of a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited text
    Csv,
    /// Spreadsheet workbook (xlsx)
    Excel,
    /// HTML document holding `<table>` elements
    Html,
}

/// Which worksheet of a workbook to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    Name(String),
    Position(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Position(0)
    }
}

/// Options shared by the decoders and encoders
#[derive(Debug, Clone, PartialEq)]
pub struct IoOptions {
    /// Worksheet to read, or the name given to the written sheet
    pub sheet: SheetSelector,
    /// Write the row labels as leading column(s)
    pub include_index: bool,
    /// Field delimiter for delimited text
    pub delimiter: u8,
    /// The first row holds column names
    pub has_header: bool,
    /// Column to turn into the row index on read
    pub index_col: Option<usize>,
    /// Which table of an HTML document to decode
    pub table_position: usize,
    /// Text written for a missing cell
    pub na_rep: String,
    /// Header written above an unnamed index column
    pub index_header: String,
}

impl Default for IoOptions {
    fn default() -> Self {
        IoOptions {
            sheet: SheetSelector::default(),
            include_index: true,
            delimiter: b',',
            has_header: true,
            index_col: None,
            table_position: 0,
            na_rep: String::new(),
            index_header: String::new(),
        }
    }
}

impl IoOptions {
    /// Options taking delimiter and text representation from the engine config
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Ok(IoOptions {
            delimiter: config.delimiter_byte()?,
            na_rep: config.na_rep.clone(),
            index_header: config.index_header.clone(),
            ..IoOptions::default()
        })
    }

    pub fn without_index(mut self) -> Self {
        self.include_index = false;
        self
    }

    pub fn with_index_col(mut self, col: usize) -> Self {
        self.index_col = Some(col);
        self
    }

    pub fn with_sheet(mut self, sheet: SheetSelector) -> Self {
        self.sheet = sheet;
        self
    }
}

/// Decode a fully materialized byte stream into a frame
pub fn decode(bytes: &[u8], format: Format, options: &IoOptions) -> Result<DataFrame> {
    let df = match format {
        Format::Csv => read_csv_from_reader(bytes, options)?,
        Format::Html => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| Error::Format(format!("HTML input is not valid UTF-8: {}", e)))?;
            let mut tables = html::read_html_with(text, options.index_col)?;
            if options.table_position >= tables.len() {
                return Err(Error::Format(format!(
                    "table {} requested but the document holds {}",
                    options.table_position,
                    tables.len()
                )));
            }
            tables.swap_remove(options.table_position)
        }
        Format::Excel => decode_excel(bytes, options)?,
    };
    log::debug!("decoded {:?} into shape {:?}", format, df.shape());
    Ok(df)
}

/// Encode a frame into a byte stream
pub fn encode(df: &DataFrame, format: Format, options: &IoOptions) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Csv => {
            let mut buffer = Vec::new();
            write_csv_to_writer(df, &mut buffer, options)?;
            buffer
        }
        Format::Html => to_html(df, options.include_index).into_bytes(),
        Format::Excel => encode_excel(df, options)?,
    };
    log::debug!("encoded shape {:?} as {:?}: {} bytes", df.shape(), format, bytes.len());
    Ok(bytes)
}

#[cfg(feature = "excel")]
fn decode_excel(bytes: &[u8], options: &IoOptions) -> Result<DataFrame> {
    read_excel_from_bytes(bytes, options)
}

#[cfg(not(feature = "excel"))]
fn decode_excel(_bytes: &[u8], _options: &IoOptions) -> Result<DataFrame> {
    Err(Error::InvalidInput(
        "spreadsheet support requires the `excel` feature".to_string(),
    ))
}

#[cfg(feature = "excel")]
fn encode_excel(df: &DataFrame, options: &IoOptions) -> Result<Vec<u8>> {
    excel::write_excel_to_bytes(df, options)
}

#[cfg(not(feature = "excel"))]
fn encode_excel(_df: &DataFrame, _options: &IoOptions) -> Result<Vec<u8>> {
    Err(Error::InvalidInput(
        "spreadsheet support requires the `excel` feature".to_string(),
    ))
}

/// Turn one column of raw text into typed cells.
///
/// Empty and NaN-like cells are missing. Integers mixed with floats become
/// floats; any other mix of types keeps the column as text.
pub(crate) fn infer_column(name: &str, raw: &[String]) -> Vec<Value> {
    let parsed: Vec<Value> = raw.iter().map(|s| Value::parse(s)).collect();
    match infer_dtype(&parsed) {
        DType::Float => parsed
            .into_iter()
            .map(|v| match v {
                Value::Int(i) => Value::Float(i as f64),
                other => other,
            })
            .collect(),
        DType::Mixed => {
            log::warn!("column '{}' mixes value types; reading it as text", name);
            raw.iter()
                .zip(parsed)
                .map(|(s, v)| if v.is_na() { Value::NA } else { Value::Str(s.trim().to_string()) })
                .collect()
        }
        _ => parsed,
    }
}

/// Column names for a header row: blanks become `Unnamed: {i}` and
/// repeats get a `.{n}` suffix
pub(crate) fn normalize_header(header: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            let base = if name.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base.clone()
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Build a frame from a header and rows of text cells.
///
/// Rows must all be as wide as the header. With `index_col`, that column
/// becomes the row index, named after its header unless the header was blank.
pub(crate) fn frame_from_text(
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    index_col: Option<usize>,
) -> Result<DataFrame> {
    let width = header.len();
    let blank: Vec<bool> = header.iter().map(|h| h.trim().is_empty()).collect();
    let names = normalize_header(header);
    let mut raw: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); width];
    for (line, row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(Error::Format(format!(
                "row {} has {} fields, expected {}",
                line + 1,
                row.len(),
                width
            )));
        }
        for (col, cell) in row.into_iter().enumerate() {
            raw[col].push(cell);
        }
    }
    let columns: Vec<(String, Vec<Value>)> = names
        .iter()
        .zip(&raw)
        .map(|(name, cells)| (name.clone(), infer_column(name, cells)))
        .collect();
    let df = DataFrame::from_columns(columns, None)?;
    let Some(col) = index_col else {
        return Ok(df);
    };
    let mut df = promote_index_column(df, col)?;
    if blank.get(col).copied().unwrap_or(false) {
        df.set_index_names(vec![None])?;
    }
    Ok(df)
}

/// Use the column at `col` as the row index
pub(crate) fn promote_index_column(df: DataFrame, col: usize) -> Result<DataFrame> {
    let name = df
        .column_names()
        .get(col)
        .cloned()
        .ok_or(Error::IndexOutOfBounds {
            index: col as isize,
            size: df.column_count(),
        })?;
    df.set_index(&name)
}

/// Render a cell for a text format
pub(crate) fn cell_text(value: &Value, na_rep: &str) -> String {
    if value.is_na() {
        na_rep.to_string()
    } else {
        value.to_string()
    }
}

/// Header and text rows of a frame, index levels first when requested
pub(crate) fn text_rows(
    df: &DataFrame,
    include_index: bool,
    na_rep: &str,
    index_header: &str,
) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = Vec::with_capacity(df.column_count() + 1);
    let index_levels: Vec<Vec<Value>> = match (include_index, df.index()) {
        (false, _) => Vec::new(),
        (true, TableIndex::Simple(idx)) => {
            header.push(idx.name().cloned().unwrap_or_else(|| index_header.to_string()));
            vec![idx.values().to_vec()]
        }
        (true, TableIndex::Multi(idx)) => (0..idx.n_levels())
            .map(|level| {
                header.push(
                    idx.names()[level]
                        .clone()
                        .unwrap_or_else(|| index_header.to_string()),
                );
                idx.get_level_values(level)
                    .map(|i: Index| i.values().to_vec())
                    .unwrap_or_default()
            })
            .collect(),
    };
    header.extend(df.column_names().iter().cloned());

    let columns: Vec<&[Value]> = df
        .column_names()
        .iter()
        .filter_map(|name| df.column_values(name).ok())
        .collect();
    let rows = (0..df.row_count())
        .map(|row| {
            index_levels
                .iter()
                .map(|level| cell_text(&level[row], na_rep))
                .chain(columns.iter().map(|col| cell_text(&col[row], na_rep)))
                .collect()
        })
        .collect();
    (header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_column_types() {
        let ints = vec!["1".to_string(), "".to_string(), "3".to_string()];
        assert_eq!(infer_column("a", &ints), vec![Value::Int(1), Value::NA, Value::Int(3)]);
        let mixed = vec!["1".to_string(), "x".to_string()];
        assert_eq!(infer_column("b", &mixed), vec![Value::from("1"), Value::from("x")]);
        let floats = vec!["1".to_string(), "2.5".to_string()];
        assert_eq!(infer_column("c", &floats), vec![Value::Float(1.0), Value::Float(2.5)]);
    }

    #[test]
    fn test_blank_and_repeated_headers() {
        let names = normalize_header(vec!["".into(), "a".into(), "a".into()]);
        assert_eq!(names, vec!["Unnamed: 0", "a", "a.1"]);
    }

    #[test]
    fn test_html_without_tables_is_format_error() {
        let err = decode(b"<p>none</p>", Format::Html, &IoOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
