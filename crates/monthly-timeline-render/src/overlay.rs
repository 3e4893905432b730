//! Template overlay renderer
//!
//! Copies the input workbook to the output path, then writes the sheet plan
//! over the copy's target sheet. Cells the plan does not touch keep their
//! content and styling, so header blocks or notes around the table survive.
//! Column widths are fitted over the whole sheet after the overlay.

use monthly_timeline_core::plan::column_letter;
use monthly_timeline_core::{
    CellValue, ColumnWidths, RenderError, Renderer, SheetPlan, DEFAULT_SHEET,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use umya_spreadsheet::{Cell, Spreadsheet, Worksheet};

/// Renders onto a copy of a template workbook
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    /// Workbook to copy; never modified
    pub template: PathBuf,
    /// Path of the copy that receives the overlay
    pub output: PathBuf,
}

impl OverlayRenderer {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }

    fn read(path: &Path) -> Result<Spreadsheet, RenderError> {
        umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| RenderError::Format(format!("Failed to open {}: {e}", path.display())))
    }

    /// Copying a file onto itself truncates it
    fn output_is_template(&self) -> Result<bool, RenderError> {
        if !self.output.exists() {
            return Ok(false);
        }
        Ok(fs::canonicalize(&self.template)? == fs::canonicalize(&self.output)?)
    }
}

impl Renderer for OverlayRenderer {
    type Output = PathBuf;

    fn render(&self, plan: &SheetPlan) -> Result<PathBuf, RenderError> {
        if self.output_is_template()? {
            return Err(RenderError::OutputIsInput(self.output.clone()));
        }

        fs::copy(&self.template, &self.output)?;
        debug!(
            template = %self.template.display(),
            output = %self.output.display(),
            "copied template"
        );

        let mut book = Self::read(&self.output)?;
        apply_plan(&mut book, plan)?;

        umya_spreadsheet::writer::xlsx::write(&book, &self.output).map_err(|e| {
            RenderError::Format(format!("Failed to write {}: {e}", self.output.display()))
        })?;

        Ok(self.output.clone())
    }
}

/// Index of the sheet a plan targets.
///
/// A named sheet must exist. Without a name, [`DEFAULT_SHEET`] is used when
/// present and the first sheet otherwise.
pub fn target_sheet_index(book: &Spreadsheet, name: Option<&str>) -> Result<usize, RenderError> {
    let sheets = book.get_sheet_collection();
    let by_name = |wanted: &str| sheets.iter().position(|sheet| sheet.get_name() == wanted);
    match name {
        Some(name) => by_name(name).ok_or_else(|| RenderError::SheetNotFound(name.to_string())),
        None => by_name(DEFAULT_SHEET)
            .or_else(|| (!sheets.is_empty()).then_some(0))
            .ok_or_else(|| RenderError::SheetNotFound(DEFAULT_SHEET.to_string())),
    }
}

/// Write values, fills and fitted widths of `plan` into an open workbook
pub fn apply_plan(book: &mut Spreadsheet, plan: &SheetPlan) -> Result<(), RenderError> {
    let index = target_sheet_index(book, plan.sheet.as_deref())?;
    let sheet = book
        .get_sheet_mut(&index)
        .ok_or_else(|| RenderError::SheetNotFound(format!("#{index}")))?;

    for (at, value) in &plan.cells {
        let cell = sheet.get_cell_mut((at.col, at.row));
        match value {
            CellValue::Text(s) => {
                cell.set_value_string(s.as_str());
            }
            CellValue::Empty => {
                cell.set_value("");
            }
        }
    }

    for at in &plan.unfilled {
        sheet
            .get_cell_mut((at.col, at.row))
            .get_style_mut()
            .remove_fill();
    }

    for (at, fill) in &plan.fills {
        sheet
            .get_cell_mut((at.col, at.row))
            .get_style_mut()
            .set_background_color(fill.argb_hex());
    }

    fit_columns(sheet);
    debug!(
        sheet = sheet.get_name(),
        cells = plan.cells.len(),
        fills = plan.fills.len(),
        cleared = plan.unfilled.len(),
        "applied sheet plan"
    );
    Ok(())
}

/// Size every used column to its longest text plus padding
fn fit_columns(sheet: &mut Worksheet) {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let mut widths = ColumnWidths::new();

    for col in 1..=max_col {
        for row in 1..=max_row {
            let text = sheet
                .get_cell((col, row))
                .filter(|cell| is_text(cell))
                .map(|cell| cell.get_value().to_string());
            widths.observe(col, text.as_deref());
        }
    }

    for (col, width) in widths.finish() {
        sheet
            .get_column_dimension_mut(&column_letter(col))
            .set_width(width);
    }
}

fn is_text(cell: &Cell) -> bool {
    matches!(cell.get_data_type(), "s" | "str" | "inlineStr")
}
