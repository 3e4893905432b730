//! Declarative sheet plan
//!
//! The plan lists every cell value, every cell fill and every column width the
//! timeline needs. Renderers apply it in a single write phase and never decide
//! styling themselves.
//!
//! Coordinates are 1-based, as in spreadsheet notation (`A1` is row 1, col 1).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sheet targeted when no sheet is named; the first sheet if it is absent
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Padding added to the longest text in a column, in character widths
pub const WIDTH_PADDING: f64 = 3.0;

/// Light green fill for active task days
pub const TASK_FILL: Fill = Fill(0xBEE7A5);

/// Red fill for weekend day headers
pub const WEEKEND_FILL: Fill = Fill(0xFF0000);

/// 1-based cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1-style name ("E1")
    pub fn a1(&self) -> String {
        format!("{}{}", column_letter(self.col), self.row)
    }
}

/// Value written into a cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    /// Cleared cell
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Solid background fill, as 0xRRGGBB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fill(pub u32);

impl Fill {
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Opaque ARGB hex string ("FFBEE7A5")
    pub fn argb_hex(self) -> String {
        format!("FF{:06X}", self.0)
    }
}

/// Everything a renderer writes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    /// Target sheet name, `None` for [`DEFAULT_SHEET`]
    pub sheet: Option<String>,
    pub cells: BTreeMap<CellRef, CellValue>,
    pub fills: BTreeMap<CellRef, Fill>,
    /// Cells that must carry no fill, whatever a template gave them
    pub unfilled: BTreeSet<CellRef>,
}

impl SheetPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, at: CellRef, value: CellValue) {
        self.cells.insert(at, value);
    }

    pub fn fill(&mut self, at: CellRef, fill: Fill) {
        self.unfilled.remove(&at);
        self.fills.insert(at, fill);
    }

    pub fn clear_fill(&mut self, at: CellRef) {
        self.fills.remove(&at);
        self.unfilled.insert(at);
    }

    pub fn value(&self, at: CellRef) -> Option<&CellValue> {
        self.cells.get(&at)
    }

    pub fn fill_at(&self, at: CellRef) -> Option<Fill> {
        self.fills.get(&at).copied()
    }

    /// Column widths derived from the plan's own cells
    pub fn column_widths(&self) -> BTreeMap<u32, f64> {
        let mut widths = ColumnWidths::new();
        for (at, value) in &self.cells {
            widths.observe(at.col, value.as_text());
        }
        widths.finish()
    }
}

/// Auto-fit accumulator: longest text per column plus padding.
///
/// Only text is measured. Non-text and empty cells still register their column,
/// which then falls back to the bare padding width.
#[derive(Clone, Debug, Default)]
pub struct ColumnWidths {
    longest: BTreeMap<u32, usize>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, col: u32, text: Option<&str>) {
        let len = text.map_or(0, |s| s.chars().count());
        let longest = self.longest.entry(col).or_insert(0);
        *longest = (*longest).max(len);
    }

    pub fn finish(self) -> BTreeMap<u32, f64> {
        self.longest
            .into_iter()
            .map(|(col, len)| (col, len as f64 + WIDTH_PADDING))
            .collect()
    }
}

/// Convert a 1-based column number to its letter (1 -> A, 26 -> Z, 27 -> AA)
pub fn column_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col.max(1) - 1;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
