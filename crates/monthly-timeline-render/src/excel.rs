//! Standalone workbook renderer
//!
//! Writes a sheet plan into a brand-new workbook, for callers that have no
//! template file to overlay. The layout is identical to the overlay output:
//! headers and day numbers in row 1 starting at column B, one task per row
//! below, solid fills on task spans and weekend days, auto-fit column widths.

use monthly_timeline_core::{CellValue, Fill, RenderError, Renderer, SheetPlan, DEFAULT_SHEET};
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashMap;
use tracing::debug;

/// Standalone xlsx renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Name of the single worksheet
    pub sheet_name: String,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET.into(),
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, plan: &SheetPlan) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(self.sheet_name.as_str())
            .map_err(|e| RenderError::Format(e.to_string()))?;

        // One format per distinct fill
        let formats: HashMap<Fill, Format> = plan
            .fills
            .values()
            .map(|fill| (*fill, Format::new().set_background_color(fill.rgb())))
            .collect();

        for (at, value) in &plan.cells {
            let row = at.row - 1;
            let col = u16::try_from(at.col - 1)
                .map_err(|_| RenderError::Format(format!("column out of range: {}", at.col)))?;
            let format = plan.fill_at(*at).and_then(|fill| formats.get(&fill));

            let written = match (value, format) {
                (CellValue::Text(s), Some(format)) => {
                    sheet.write_string_with_format(row, col, s.as_str(), format)
                }
                (CellValue::Text(s), None) => sheet.write_string(row, col, s.as_str()),
                (CellValue::Empty, Some(format)) => sheet.write_blank(row, col, format),
                (CellValue::Empty, None) => continue,
            };
            written.map_err(|e| RenderError::Format(e.to_string()))?;
        }

        for (col, width) in plan.column_widths() {
            let col = u16::try_from(col - 1)
                .map_err(|_| RenderError::Format(format!("column out of range: {col}")))?;
            sheet
                .set_column_width(col, width)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;
        debug!(bytes = buffer.len(), cells = plan.cells.len(), "rendered standalone workbook");

        Ok(buffer)
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, plan: &SheetPlan) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(plan)
    }
}
