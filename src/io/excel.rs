use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use simple_excel_writer::{Row, Workbook};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::{frame_from_text, text_rows, IoOptions, SheetSelector};

const DEFAULT_SHEET: &str = "Sheet1";

fn sheet_name<RS: Read + Seek>(workbook: &Xlsx<RS>, sheet: &SheetSelector) -> Result<String> {
    let names = workbook.sheet_names();
    match sheet {
        SheetSelector::Name(name) => {
            if names.iter().any(|n| n == name) {
                Ok(name.clone())
            } else {
                Err(Error::KeyNotFound(format!("sheet '{}'", name)))
            }
        }
        SheetSelector::Position(pos) => names.get(*pos).cloned().ok_or(Error::IndexOutOfBounds {
            index: *pos as isize,
            size: names.len(),
        }),
    }
}

fn read_sheet<RS: Read + Seek>(workbook: &mut Xlsx<RS>, options: &IoOptions) -> Result<DataFrame> {
    let name = sheet_name(workbook, &options.sheet)?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| Error::Excel(format!("could not read sheet '{}': {}", name, e)))?;

    let mut rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    let header = if options.has_header && !rows.is_empty() {
        rows.remove(0)
    } else {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    };
    log::debug!("sheet '{}': {} data rows", name, rows.len());
    frame_from_text(header, rows, options.index_col)
}

/// Read one worksheet of an xlsx file
pub fn read_excel<P: AsRef<Path>>(path: P, options: &IoOptions) -> Result<DataFrame> {
    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())
        .map_err(|e| Error::Excel(format!("could not open workbook: {}", e)))?;
    read_sheet(&mut workbook, options)
}

/// Read one worksheet of an in-memory xlsx workbook
pub fn read_excel_from_bytes(bytes: &[u8], options: &IoOptions) -> Result<DataFrame> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::Format(format!("not an xlsx workbook: {}", e)))?;
    read_sheet(&mut workbook, options)
}

/// Names of the worksheets, in workbook order
pub fn list_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())
        .map_err(|e| Error::Excel(format!("could not open workbook: {}", e)))?;
    Ok(workbook.sheet_names().to_vec())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::InvalidInput(format!("path {} is not valid UTF-8", path.display())))
}

fn write_into(
    workbook: &mut Workbook,
    name: &str,
    df: &DataFrame,
    include_index: bool,
    na_rep: &str,
    index_header: &str,
) -> Result<()> {
    let (header, rows) = text_rows(df, include_index, na_rep, index_header);
    let index_width = header.len() - df.column_count();
    let columns: Vec<&[crate::value::Value]> = df
        .column_names()
        .iter()
        .map(|c| df.column_values(c))
        .collect::<Result<Vec<_>>>()?;

    let mut sheet = workbook.create_sheet(name);
    workbook.write_sheet(&mut sheet, |sheet_writer| {
        let mut header_row = Row::new();
        for h in &header {
            header_row.add_cell(h.as_str());
        }
        sheet_writer.append_row(header_row)?;

        for (pos, text) in rows.iter().enumerate() {
            let mut row = Row::new();
            for (i, cell) in text.iter().enumerate() {
                // numeric cells stay numeric
                let value = if i >= index_width {
                    columns[i - index_width][pos].as_f64()
                } else {
                    None
                };
                match value {
                    Some(v) => row.add_cell(v),
                    None => row.add_cell(cell.as_str()),
                }
            }
            sheet_writer.append_row(row)?;
        }
        Ok(())
    })?;
    Ok(())
}

/// Write a frame to an xlsx file as a single worksheet
pub fn write_excel<P: AsRef<Path>>(df: &DataFrame, path: P, options: &IoOptions) -> Result<()> {
    let name = match &options.sheet {
        SheetSelector::Name(name) => name.as_str(),
        SheetSelector::Position(_) => DEFAULT_SHEET,
    };
    let mut workbook = Workbook::create(path_str(path.as_ref())?);
    write_into(
        &mut workbook,
        name,
        df,
        options.include_index,
        &options.na_rep,
        &options.index_header,
    )?;
    workbook
        .close()
        .map_err(|e| Error::Excel(format!("could not save workbook: {}", e)))?;
    log::debug!("wrote {} rows to {}", df.row_count(), path.as_ref().display());
    Ok(())
}

/// Write several frames to one workbook, one worksheet each
pub fn write_excel_sheets<P: AsRef<Path>>(
    sheets: &[(&str, &DataFrame)],
    path: P,
    include_index: bool,
) -> Result<()> {
    let mut workbook = Workbook::create(path_str(path.as_ref())?);
    for (name, df) in sheets {
        write_into(&mut workbook, name, df, include_index, "", "")?;
    }
    workbook
        .close()
        .map_err(|e| Error::Excel(format!("could not save workbook: {}", e)))?;
    Ok(())
}

/// Encode through a temporary file, since the writer targets paths
pub(crate) fn write_excel_to_bytes(df: &DataFrame, options: &IoOptions) -> Result<Vec<u8>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("encode.xlsx");
    write_excel(df, &path, options)?;
    Ok(std::fs::read(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;

    #[test]
    fn test_workbook_round_trip() {
        let df = DataFrame::from_columns(
            vec![("a", cells![1, 2]), ("b", cells!["x", "y"])],
            None,
        )
        .unwrap();
        let options = IoOptions::default().without_index();
        let bytes = write_excel_to_bytes(&df, &options).unwrap();
        let back = read_excel_from_bytes(&bytes, &options).unwrap();
        assert_eq!(back.column_names(), df.column_names());
        assert_eq!(back.column_values("b").unwrap(), df.column_values("b").unwrap());
    }
}
