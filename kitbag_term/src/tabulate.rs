//! Fixed-column table construction and rendering.
//!
//! Cell widths are measured once at insertion through
//! [`wcwidth`](crate::wcwidth), and per-column width trackers grow
//! monotonically as rows arrive, so rendering never has to rescan the data.

use std::io::{self, Write};

use itertools::izip;
use kitbag_core::bug;

use crate::wcwidth;

/// Default separator bar text.
const DEFAULT_BAR: &str = "---";

/// One cell: its text plus the display width measured at construction.
#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    fn new(text: &str) -> Self {
        // Text whose width cannot be measured renders unpadded.
        let width = wcwidth::str_width(text).unwrap_or(0);
        Self {
            text: text.to_owned(),
            width,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Per-column maximum width, monotone under updates.
#[derive(Debug, Clone)]
struct WidthTracker {
    widths: Vec<usize>,
}

impl WidthTracker {
    fn new(columns: usize) -> Self {
        Self {
            widths: vec![0; columns],
        }
    }

    fn update(&mut self, column: usize, width: usize) {
        let slot = &mut self.widths[column];
        *slot = (*slot).max(width);
    }

    fn get(&self, column: usize) -> usize {
        self.widths[column]
    }

    fn clear(&mut self) {
        self.widths.fill(0);
    }
}

/// A left-justified table with a fixed number of columns.
///
/// The header and the separator bar are shown by default. Rendering pads
/// every cell to the effective column width with spaces and one trailing
/// separator space; no wrapping or column splitting is performed.
#[derive(Debug, Clone)]
pub struct Tabulate {
    columns: usize,
    header_display: bool,
    bar_display: bool,
    prefix: String,
    header: Vec<Cell>,
    header_widths: WidthTracker,
    bar: Cell,
    rows: Vec<Vec<Cell>>,
    row_widths: WidthTracker,
}

impl Tabulate {
    /// Creates a table with `columns` columns and an empty header.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            header_display: true,
            bar_display: true,
            prefix: String::new(),
            header: vec![Cell::new(""); columns],
            header_widths: WidthTracker::new(columns),
            bar: Cell::new(DEFAULT_BAR),
            rows: Vec::new(),
            row_widths: WidthTracker::new(columns),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn show_header(&mut self, show: bool) {
        self.header_display = show;
    }

    pub fn show_bar(&mut self, show: bool) {
        self.bar_display = show;
    }

    /// Text written at the start of every rendered line.
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_owned();
    }

    /// Replaces the separator bar text.
    pub fn set_bar(&mut self, bar: &str) {
        self.bar = Cell::new(bar);
    }

    /// Replaces the header row; a width mismatch is a caller bug.
    pub fn set_header<I, S>(&mut self, header: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Cell> = header.into_iter().map(|s| Cell::new(s.as_ref())).collect();
        if cells.len() != self.columns {
            bug!(
                "header has {} cells but the table has {} columns",
                cells.len(),
                self.columns
            );
        }
        self.header_widths.clear();
        for (column, cell) in cells.iter().enumerate() {
            self.header_widths.update(column, cell.width());
        }
        self.header = cells;
    }

    /// Appends a data row; a width mismatch is a caller bug.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Cell> = row.into_iter().map(|s| Cell::new(s.as_ref())).collect();
        if cells.len() != self.columns {
            bug!(
                "row has {} cells but the table has {} columns",
                cells.len(),
                self.columns
            );
        }
        for (column, cell) in cells.iter().enumerate() {
            self.row_widths.update(column, cell.width());
        }
        self.rows.push(cells);
    }

    /// Removes every data row and resets the data width tracker. The header
    /// is untouched.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.row_widths.clear();
    }

    /// Writes the table to `dst`.
    pub fn render(&self, dst: &mut dyn Write) -> io::Result<()> {
        // Effective widths depend on which decorations are visible.
        let mut widths = self.row_widths.clone();
        if self.header_display {
            for column in 0..self.columns {
                widths.update(column, self.header_widths.get(column));
            }
        }
        if self.bar_display {
            for column in 0..self.columns {
                widths.update(column, self.bar.width());
            }
        }

        // One shared pad buffer long enough for any column.
        let pad_len = widths.widths.iter().copied().max().unwrap_or(0).max(1);
        let pad = " ".repeat(pad_len);

        if self.header_display {
            self.render_cells(dst, &self.header, &widths, &pad)?;
        }
        if self.bar_display {
            write!(dst, "{}", self.prefix)?;
            for column in 0..self.columns {
                let fill = widths.get(column).saturating_sub(self.bar.width());
                write!(dst, "{}{} ", self.bar.text(), &pad[..fill])?;
            }
            writeln!(dst)?;
        }
        for row in &self.rows {
            self.render_cells(dst, row, &widths, &pad)?;
        }
        Ok(())
    }

    fn render_cells(
        &self,
        dst: &mut dyn Write,
        cells: &[Cell],
        widths: &WidthTracker,
        pad: &str,
    ) -> io::Result<()> {
        write!(dst, "{}", self.prefix)?;
        for (cell, &target) in izip!(cells, &widths.widths) {
            let fill = target.saturating_sub(cell.width());
            write!(dst, "{}{} ", cell.text(), &pad[..fill])?;
        }
        writeln!(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(table: &Tabulate) -> String {
        let mut out = Vec::new();
        table.render(&mut out).expect("render into buffer");
        String::from_utf8(out).expect("rendered output is UTF-8")
    }

    fn sample_table() -> Tabulate {
        let mut table = Tabulate::new(3);
        table.set_header(["A", "B", "C"]);
        table.add_row(["xx", "y", "zzz"]);
        table.add_row(["a", "bbb", "c"]);
        table
    }

    #[test]
    fn renders_header_bar_and_rows() {
        let rendered = render_to_string(&sample_table());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            ["A   B   C   ", "--- --- --- ", "xx  y   zzz ", "a   bbb c   "]
        );
    }

    #[test]
    fn wide_text_pads_by_display_width() {
        let mut table = Tabulate::new(2);
        table.set_header(["name", "val"]);
        // Two CJK characters occupy four cells, same as "name".
        table.add_row(["\u{4F60}\u{597D}", "1"]);
        let rendered = render_to_string(&table);
        assert_eq!(
            rendered.lines().collect::<Vec<_>>(),
            ["name val ", "---  --- ", "\u{4F60}\u{597D} 1   "]
        );
    }

    #[test]
    fn hidden_decorations_shrink_columns() {
        let mut table = sample_table();
        table.show_header(false);
        table.show_bar(false);
        let rendered = render_to_string(&table);
        assert_eq!(rendered.lines().collect::<Vec<_>>(), ["xx y   zzz ", "a  bbb c   "]);
    }

    #[test]
    fn prefix_precedes_every_line() {
        let mut table = sample_table();
        table.set_prefix("  ");
        let rendered = render_to_string(&table);
        assert!(rendered.lines().all(|line| line.starts_with("  ")));
    }

    #[test]
    fn clear_drops_rows_but_keeps_header() {
        let mut table = sample_table();
        table.clear();
        table.add_row(["1", "2", "3"]);
        let rendered = render_to_string(&table);
        // Row widths reset, so columns size to the header and bar again.
        assert_eq!(
            rendered.lines().collect::<Vec<_>>(),
            ["A   B   C   ", "--- --- --- ", "1   2   3   "]
        );
    }
}
