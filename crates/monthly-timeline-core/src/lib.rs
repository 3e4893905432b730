//! # monthly-timeline-core
//!
//! Core domain model for building a one-month Gantt timeline out of a task list.
//!
//! This crate provides:
//! - Domain types: `Task`, `TaskTable`, `Period`, `MonthCalendar`, `DayGrid`
//! - The staged pipeline: `Timeline::build` turns a task table and a period
//!   into a declarative `SheetPlan`
//! - The `Renderer` trait implemented by output backends
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use monthly_timeline_core::{GridWidth, Period, Task, TaskTable, Timeline};
//!
//! let mut table = TaskTable::new(["Task", "Start Date", "End Date"]);
//! table.tasks.push(Task::new("Design", 2, 5));
//! table.tasks.push(Task::new("Build", 4, 10));
//!
//! let period: Period = "09-2024".parse().unwrap();
//! let timeline = Timeline::build(&table, period, GridWidth::Full).unwrap();
//!
//! assert_eq!(timeline.calendar.days_in_month, 30);
//! assert!(timeline.calendar.is_weekend(7));
//! assert_eq!(timeline.rows[0].start_label, "Monday, 02 September 2024");
//! ```

pub mod calendar;
pub mod grid;
pub mod plan;
pub mod timeline;

pub use calendar::{MonthCalendar, Period, PeriodError};
pub use grid::{DayGrid, GridWidth, MARKER};
pub use plan::{
    CellRef, CellValue, ColumnWidths, Fill, SheetPlan, DEFAULT_SHEET, TASK_FILL, WEEKEND_FILL,
};
pub use timeline::{Timeline, TimelineRow, TimelineSummary};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Task Table
// ============================================================================

/// A single task row: a name and an inclusive day span within the month
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub start_day: u32,
    pub end_day: u32,
}

impl Task {
    pub fn new(name: impl Into<String>, start_day: u32, end_day: u32) -> Self {
        Self {
            name: name.into(),
            start_day,
            end_day,
        }
    }

    /// Days covered by this task, start through end inclusive.
    ///
    /// An inverted span (start after end) yields no days.
    pub fn days(&self) -> std::ops::RangeInclusive<u32> {
        self.start_day..=self.end_day
    }
}

/// Task list as read from the input sheet, with its header labels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTable {
    /// Header labels of the name, start and end columns
    pub headers: [String; 3],
    pub tasks: Vec<Task>,
}

impl TaskTable {
    pub fn new(headers: [&str; 3]) -> Self {
        Self {
            headers: headers.map(String::from),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a sheet plan to the output format
    fn render(&self, plan: &SheetPlan) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Error while turning a task table into a timeline
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Malformed task row {row} ({task}): day {day} is not a date in {period}")]
    DayOutOfRange {
        row: usize,
        task: String,
        day: u32,
        period: Period,
    },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Output would overwrite the input workbook: {0}")]
    OutputIsInput(std::path::PathBuf),
}

// ============================================================================
// Tests
// ============================================================================
