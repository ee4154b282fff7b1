use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::{frame_from_text, text_rows, IoOptions};

/// Read a delimited text file into a frame
pub fn read_csv<P: AsRef<Path>>(path: P, options: &IoOptions) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    let df = read_csv_from_reader(file, options)?;
    log::debug!("read {} rows from {}", df.row_count(), path.as_ref().display());
    Ok(df)
}

/// Read delimited text from any reader.
///
/// Every record must have as many fields as the header; a ragged record is
/// a format error. Without a header, columns are named by position.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &IoOptions) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(options.delimiter)
        .flexible(false)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(format_error)?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    let header: Vec<String> = if options.has_header {
        rdr.headers()
            .map_err(format_error)?
            .iter()
            .map(|h| h.to_string())
            .collect()
    } else {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    };
    frame_from_text(header, rows, options.index_col)
}

/// Ragged records surface as a format error; everything else keeps its cause
fn format_error(err: csv::Error) -> Error {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => Error::Format(format!(
            "record {} has {} fields, expected {}",
            pos.as_ref().map(|p| p.record()).unwrap_or_default(),
            len,
            expected_len
        )),
        csv::ErrorKind::Utf8 { .. } => Error::Format(err.to_string()),
        _ => Error::Csv(err),
    }
}

/// Write a frame to a delimited text file
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P, options: &IoOptions) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to_writer(df, file, options)?;
    log::debug!("wrote {} rows to {}", df.row_count(), path.as_ref().display());
    Ok(())
}

/// Write delimited text to any writer. The index, when included, is
/// written first under an empty header unless it is named.
pub fn write_csv_to_writer<W: Write>(df: &DataFrame, writer: W, options: &IoOptions) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);
    let (header, rows) = text_rows(df, options.include_index, &options.na_rep, &options.index_header);
    if options.has_header {
        wtr.write_record(&header)?;
    }
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::value::Value;

    #[test]
    fn test_ragged_rows_are_format_errors() {
        let data = "a,b\n1,2\n3\n";
        let err = read_csv_from_reader(data.as_bytes(), &IoOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_index_written_first_with_blank_header() {
        let df = DataFrame::from_columns(vec![("a", cells![1, Value::NA])], None).unwrap();
        let mut buffer = Vec::new();
        write_csv_to_writer(&df, &mut buffer, &IoOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), ",a\n0,1\n1,\n");
    }

    #[test]
    fn test_headerless_columns_named_by_position() {
        let options = IoOptions {
            has_header: false,
            ..IoOptions::default()
        };
        let df = read_csv_from_reader("x,1\ny,2\n".as_bytes(), &options).unwrap();
        assert_eq!(df.column_names(), &["0", "1"]);
        assert_eq!(df.column_values("1").unwrap(), &cells![1, 2]);
    }
}
