use std::fmt;

use crate::config::TableConfig;
use crate::dataframe::DataFrame;
use crate::value::Value;

impl DataFrame {
    fn render_cell(value: &Value, config: &TableConfig) -> String {
        match config.display_precision {
            Some(p) => value.format_with(p),
            None => value.to_string(),
        }
    }

    /// Text grid of the frame under the given options.
    ///
    /// Longer frames show the leading and trailing rows around a `...` line
    /// and end with their shape.
    pub fn to_string_with(&self, config: &TableConfig) -> String {
        let n_rows = self.row_count();
        let shown: Vec<Option<usize>> = if n_rows > config.display_max_rows {
            let head = config.display_max_rows.div_ceil(2);
            let tail = config.display_max_rows - head;
            (0..head)
                .map(Some)
                .chain(std::iter::once(None))
                .chain((n_rows - tail..n_rows).map(Some))
                .collect()
        } else {
            (0..n_rows).map(Some).collect()
        };

        let labels: Vec<String> = shown
            .iter()
            .map(|pos| match pos {
                Some(p) => self.index.label(*p).map(|l| l.to_string()).unwrap_or_default(),
                None => "...".to_string(),
            })
            .collect();
        let header_label = config.index_header.clone();
        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(header_label.chars().count()))
            .max()
            .unwrap_or(0);

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.column_count());
        for name in &self.column_names {
            let cells = &self.columns[name];
            let mut column = vec![name.clone()];
            column.extend(shown.iter().map(|pos| match pos {
                Some(p) => Self::render_cell(&cells[*p], config),
                None => "...".to_string(),
            }));
            grid.push(column);
        }
        let widths: Vec<usize> = grid
            .iter()
            .map(|col| col.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{:<w$}", header_label, w = label_width));
        for (col, width) in grid.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", col[0], w = *width));
        }
        for (row, label) in labels.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{:<w$}", label, w = label_width));
            for (col, width) in grid.iter().zip(&widths) {
                out.push_str(&format!("  {:>w$}", col[row + 1], w = *width));
            }
        }
        if n_rows > config.display_max_rows {
            out.push_str(&format!(
                "\n\n[{} rows x {} columns]",
                n_rows,
                self.column_count()
            ));
        }
        out
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(&TableConfig::default()))
    }
}
