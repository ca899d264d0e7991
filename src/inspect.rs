//! Quick look at a scraped CSV: prune noise columns, count, preview.

use std::io;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::InspectError;

/// How `render` lays out cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_colwidth: usize,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_colwidth: 80,
            width: 120,
        }
    }
}

/// Header plus string rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    pub fn from_path(path: &Path) -> Result<Self, InspectError> {
        if !path.is_file() {
            return Err(InspectError::NotFound(absolute(path)));
        }

        let csv_err = |source| InspectError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path).map_err(csv_err)?;
        let frame = Self::from_csv(reader).map_err(csv_err)?;

        debug!(path = %path.display(), rows = frame.len(), cols = frame.width(), "csv loaded");
        Ok(frame)
    }

    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self, csv::Error> {
        Self::from_csv(ReaderBuilder::new().flexible(true).from_reader(rdr))
    }

    /// Short rows are padded with empty cells; rows wider than the header
    /// are rejected.
    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        for rec in reader.records() {
            let rec = rec?;
            if rec.len() > width {
                let line = rec.position().map_or(0, |p| p.line());
                return Err(csv::Error::from(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("expected {width} fields in line {line}, saw {}", rec.len()),
                )));
            }
            let mut row: Vec<String> = rec.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Remove every column whose name is listed. Names that are not present
    /// are ignored. Returns the names actually dropped.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.iter().any(|n| n.as_ref() == c.as_str()))
            .collect();
        if keep.iter().all(|k| *k) {
            return Vec::new();
        }

        let mut dropped = Vec::new();
        let columns = std::mem::take(&mut self.columns);
        for (col, k) in columns.into_iter().zip(&keep) {
            if *k {
                self.columns.push(col);
            } else {
                dropped.push(col);
            }
        }
        for row in &mut self.rows {
            let mut i = 0;
            row.retain(|_| {
                let k = keep.get(i).copied().unwrap_or(true);
                i += 1;
                k
            });
        }
        dropped
    }

    pub fn head(&self, n: usize) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// `Rows: 1,234 | Columns: ['a', 'b']`
    pub fn summary_line(&self) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| quote_name(c)).collect();
        format!(
            "Rows: {} | Columns: [{}]",
            thousands(self.len()),
            cols.join(", ")
        )
    }

    /// Right-aligned text table with a leading row index. Columns that do
    /// not fit in `opts.width` continue in further blocks.
    pub fn render(&self, opts: &RenderOptions) -> String {
        if self.rows.is_empty() || self.columns.is_empty() {
            let cols: Vec<String> = self.columns.iter().map(|c| quote_name(c)).collect();
            let index: Vec<String> = (0..self.rows.len()).map(|i| i.to_string()).collect();
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: [{}]",
                cols.join(", "),
                index.join(", ")
            );
        }

        let labels: Vec<String> = (0..self.rows.len()).map(|i| i.to_string()).collect();
        let index_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                (0..self.columns.len())
                    .map(|c| display_cell(row.get(c).map(String::as_str), opts.max_colwidth))
                    .collect()
            })
            .collect();
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| truncate(&single_line(c), opts.max_colwidth))
            .collect();

        let widths: Vec<usize> = (0..self.columns.len())
            .map(|c| {
                cells
                    .iter()
                    .map(|row| char_len(&row[c]))
                    .chain(std::iter::once(char_len(&headers[c])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let blocks = split_blocks(&widths, index_width, opts.width);
        let mut out = Vec::with_capacity(blocks.len());

        for (b, block) in blocks.iter().enumerate() {
            let last = b + 1 == blocks.len();
            let mut lines = Vec::with_capacity(self.rows.len() + 1);

            let mut header = " ".repeat(index_width);
            for &c in block {
                header.push_str("  ");
                header.push_str(&pad_left(&headers[c], widths[c]));
            }
            if !last {
                header.push_str("  \\");
            }
            lines.push(header);

            for (label, row) in labels.iter().zip(&cells) {
                let mut line = pad_right(label, index_width);
                for &c in block {
                    line.push_str("  ");
                    line.push_str(&pad_left(&row[c], widths[c]));
                }
                lines.push(line);
            }
            out.push(lines.join("\n"));
        }

        out.join("\n\n")
    }
}

/// Greedy column packing: each block holds as many columns as fit in
/// `width`, but always at least one.
fn split_blocks(widths: &[usize], index_width: usize, width: usize) -> Vec<Vec<usize>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    let mut used = index_width;

    for (c, w) in widths.iter().enumerate() {
        let need = 2 + w;
        if !current.is_empty() && used + need > width {
            blocks.push(std::mem::take(&mut current));
            used = index_width;
        }
        current.push(c);
        used += need;
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn display_cell(cell: Option<&str>, max_colwidth: usize) -> String {
    match cell {
        None | Some("") => "NaN".to_string(),
        Some(s) => truncate(&single_line(s), max_colwidth),
    }
}

fn single_line(s: &str) -> String {
    s.replace("\r\n", "\\n").replace(['\n', '\r'], "\\n")
}

fn truncate(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = s.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(char_len(s))), s)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(char_len(s))))
}

/// Column name in list-literal form, single-quoted unless the name itself
/// contains a single quote.
fn quote_name(name: &str) -> String {
    if name.contains('\'') && !name.contains('"') {
        format!("\"{}\"", name.replace('\\', "\\\\"))
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Absolute form of `path` for error messages, without requiring it to exist.
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
