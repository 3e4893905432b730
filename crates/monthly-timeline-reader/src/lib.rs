//! # monthly-timeline-reader
//!
//! Loads the task list of a monthly schedule workbook.
//!
//! The input sheet keeps its table in columns B through D: row 1 holds the
//! header labels (task name, start day, end day) and every following row holds
//! one task. Start and end days are day-of-month numbers, stored either as
//! numbers or as numeric text.
//!
//! ## Example
//!
//! ```rust,ignore
//! use monthly_timeline_reader::load_task_table;
//!
//! let table = load_task_table("monthly-schedule.xlsx".as_ref(), None)?;
//! for task in &table.tasks {
//!     println!("{}: {}..={}", task.name, task.start_day, task.end_day);
//! }
//! ```

use monthly_timeline_core::{Task, TaskTable, DEFAULT_SHEET};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Column holding the task name (B)
pub const NAME_COLUMN: u32 = 2;
/// Column holding the start day (C)
pub const START_COLUMN: u32 = 3;
/// Column holding the end day (D)
pub const END_COLUMN: u32 = 4;

const HEADER_ROW: u32 = 1;

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Missing columns: no header in {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed task row {row}: {column} value {value:?} is not a day number")]
    MalformedRow {
        row: u32,
        column: &'static str,
        value: String,
    },
}

/// Load the task table from a workbook on disk.
///
/// `sheet` selects a sheet by name; `None` reads the sheet named
/// [`DEFAULT_SHEET`], or the first sheet when there is none.
pub fn load_task_table(path: &Path, sheet: Option<&str>) -> Result<TaskTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let table = read_task_table(&book, sheet)?;
    debug!(path = %path.display(), tasks = table.len(), "loaded task table");
    Ok(table)
}

/// Read the task table out of an already opened workbook
pub fn read_task_table(book: &Spreadsheet, sheet: Option<&str>) -> Result<TaskTable, LoadError> {
    let worksheet = match sheet {
        Some(name) => book
            .get_sheet_by_name(name)
            .ok_or_else(|| LoadError::SheetNotFound(name.to_string()))?,
        None => book
            .get_sheet_by_name(DEFAULT_SHEET)
            .or_else(|| book.get_sheet(&0))
            .ok_or_else(|| LoadError::SheetNotFound(DEFAULT_SHEET.to_string()))?,
    };

    let headers = read_headers(worksheet)?;
    let mut table = TaskTable {
        headers,
        tasks: Vec::new(),
    };

    let last_row = last_table_row(worksheet);
    for row in (HEADER_ROW + 1)..=last_row {
        let name = cell_text(worksheet, NAME_COLUMN, row);
        let start_day = read_day(worksheet, START_COLUMN, row, "start day")?;
        let end_day = read_day(worksheet, END_COLUMN, row, "end day")?;
        table.tasks.push(Task::new(name, start_day, end_day));
    }

    Ok(table)
}

fn read_headers(worksheet: &Worksheet) -> Result<[String; 3], LoadError> {
    let headers = [NAME_COLUMN, START_COLUMN, END_COLUMN]
        .map(|col| cell_text(worksheet, col, HEADER_ROW).trim().to_string());

    let missing: Vec<String> = [NAME_COLUMN, START_COLUMN, END_COLUMN]
        .iter()
        .zip(&headers)
        .filter(|(_, header)| header.is_empty())
        .map(|(col, _)| format!("{}{HEADER_ROW}", monthly_timeline_core::plan::column_letter(*col)))
        .collect();

    if missing.is_empty() {
        Ok(headers)
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Last row with any content in B:D. Blank rows after it are ignored.
fn last_table_row(worksheet: &Worksheet) -> u32 {
    let highest = worksheet.get_highest_row();
    (HEADER_ROW + 1..=highest)
        .rev()
        .find(|row| {
            [NAME_COLUMN, START_COLUMN, END_COLUMN]
                .iter()
                .any(|col| !cell_text(worksheet, *col, *row).trim().is_empty())
        })
        .unwrap_or(HEADER_ROW)
}

fn cell_text(worksheet: &Worksheet, col: u32, row: u32) -> String {
    worksheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

fn read_day(worksheet: &Worksheet, col: u32, row: u32, column: &'static str) -> Result<u32, LoadError> {
    let value = cell_text(worksheet, col, row);
    parse_day(&value).ok_or(LoadError::MalformedRow { row, column, value })
}

/// Parse a day number stored as an integer, a whole float ("5.0") or numeric text.
pub fn parse_day(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(day) = value.parse::<u32>() {
        return Some(day);
    }
    let number = value.parse::<f64>().ok()?;
    if number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number) {
        Some(number as u32)
    } else {
        None
    }
}
