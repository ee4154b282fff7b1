//! HTML tables
//!
//! Reading scans `<table>` elements with regular expressions; it handles the
//! tables produced by [`to_html`] and similar plain markup, not arbitrary
//! documents. Nested tables are not supported.

use regex::Regex;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::{frame_from_text, text_rows};

struct Patterns {
    table: Regex,
    row: Regex,
    cell: Regex,
    tag: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        Ok(Patterns {
            table: Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>")?,
            row: Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>")?,
            cell: Regex::new(r"(?is)<(th|td)\b[^>]*>(.*?)</(?:th|td)\s*>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
        })
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A parsed row: cell texts and whether every cell was a `<th>`
fn parse_row(patterns: &Patterns, row: &str) -> (Vec<String>, bool) {
    let mut all_header = true;
    let cells = patterns
        .cell
        .captures_iter(row)
        .map(|cap| {
            if !cap[1].eq_ignore_ascii_case("th") {
                all_header = false;
            }
            let inner = patterns.tag.replace_all(&cap[2], "");
            unescape(inner.trim())
        })
        .collect::<Vec<_>>();
    let all_header = all_header && !cells.is_empty();
    (cells, all_header)
}

/// Parse every table of an HTML document
pub fn read_html(text: &str) -> Result<Vec<DataFrame>> {
    read_html_with(text, None)
}

/// Parse every table, promoting column `index_col` of each to its row index.
///
/// The header comes from a leading row made only of `<th>` cells; otherwise
/// columns are named by position. Short rows are padded with missing cells.
pub fn read_html_with(text: &str, index_col: Option<usize>) -> Result<Vec<DataFrame>> {
    let patterns = Patterns::new()?;
    let mut tables = Vec::new();
    for table in patterns.table.captures_iter(text) {
        let mut rows: Vec<(Vec<String>, bool)> = patterns
            .row
            .captures_iter(&table[1])
            .map(|cap| parse_row(&patterns, &cap[1]))
            .filter(|(cells, _)| !cells.is_empty())
            .collect();

        let header = match rows.first() {
            Some((cells, true)) => {
                let header = cells.clone();
                rows.remove(0);
                header
            }
            _ => {
                let width = rows.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
                (0..width).map(|i| i.to_string()).collect()
            }
        };
        let width = rows
            .iter()
            .map(|(c, _)| c.len())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        let mut header = header;
        header.resize(width, String::new());
        let body = rows
            .into_iter()
            .map(|(mut cells, _)| {
                cells.resize(width, String::new());
                cells
            })
            .collect();
        tables.push(frame_from_text(header, body, index_col)?);
    }
    if tables.is_empty() {
        return Err(Error::Format("no tables found".to_string()));
    }
    log::debug!("read {} HTML tables", tables.len());
    Ok(tables)
}

/// Render a frame as an HTML table; index labels are written as `<th>` cells
pub fn to_html(df: &DataFrame, include_index: bool) -> String {
    let (header, rows) = text_rows(df, include_index, "NaN", "");
    let index_width = header.len() - df.column_count();

    let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>\n");
    for name in &header {
        out.push_str(&format!("      <th>{}</th>\n", escape(name)));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in &rows {
        out.push_str("    <tr>\n");
        for (i, cell) in row.iter().enumerate() {
            let tag = if i < index_width { "th" } else { "td" };
            out.push_str(&format!("      <{tag}>{}</{tag}>\n", escape(cell)));
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::value::Value;

    #[test]
    fn test_reads_header_and_types() {
        let html = "<html><body><table><tr><th>Bank</th><th>Closed</th></tr>\
                    <tr><td>First &amp; Co</td><td>3</td></tr>\
                    <tr><td><a href=\"#\">Second</a></td><td>5</td></tr></table></body></html>";
        let tables = read_html(html).unwrap();
        assert_eq!(tables.len(), 1);
        let df = &tables[0];
        assert_eq!(df.column_names(), &["Bank", "Closed"]);
        assert_eq!(df.column_values("Bank").unwrap(), &cells!["First & Co", "Second"]);
        assert_eq!(df.column_values("Closed").unwrap(), &cells![3, 5]);
    }

    #[test]
    fn test_no_tables() {
        assert!(matches!(read_html("<p>nothing</p>"), Err(Error::Format(msg)) if msg == "no tables found"));
    }

    #[test]
    fn test_to_html_marks_missing() {
        let df = DataFrame::from_columns(vec![("a", cells![Value::NA])], None).unwrap();
        let html = to_html(&df, false);
        assert!(html.contains("<td>NaN</td>"));
        assert!(!html.contains("<th>0</th>"));
    }
}
