//! Timeline pipeline
//!
//! Each stage takes the previous stage's output and returns a new value:
//!
//! ```text
//! Period ──> MonthCalendar ──┬──> TimelineRow (formatted dates)
//! TaskTable ─────────────────┼──> DayGrid (marked spans)
//!                            └──> Timeline ──> SheetPlan
//! ```

use crate::calendar::{MonthCalendar, Period};
use crate::grid::{DayGrid, GridWidth};
use crate::plan::{CellRef, CellValue, SheetPlan, TASK_FILL, WEEKEND_FILL};
use crate::{Task, TaskTable, TimelineError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Row holding the column headers and day numbers
pub const HEADER_ROW: u32 = 1;
/// Row of the first task
pub const FIRST_TASK_ROW: u32 = 2;
/// Column of the task name (B); start and end dates follow it
pub const NAME_COL: u32 = 2;
/// Column of day 1 (E)
pub const GRID_COL: u32 = NAME_COL + 3;

/// A task with its dates rendered for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub name: String,
    pub start_day: u32,
    pub end_day: u32,
    pub start_label: String,
    pub end_label: String,
}

/// Fully resolved timeline for one period
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub headers: [String; 3],
    pub calendar: MonthCalendar,
    pub rows: Vec<TimelineRow>,
    pub grid: DayGrid,
}

impl Timeline {
    pub fn build(
        table: &TaskTable,
        period: Period,
        width: GridWidth,
    ) -> Result<Self, TimelineError> {
        let calendar = MonthCalendar::new(period);
        debug!(
            period = %period,
            days_in_month = calendar.days_in_month,
            weekend_days = ?calendar.weekend_days,
            "resolved month calendar"
        );

        let rows = format_rows(&table.tasks, &calendar)?;
        let grid = DayGrid::new(table.len(), width.columns(&calendar))
            .mark_tasks(&table.tasks, &calendar);
        debug!(tasks = rows.len(), columns = grid.columns, "built day grid");

        Ok(Self {
            headers: table.headers.clone(),
            calendar,
            rows,
            grid,
        })
    }

    pub fn period(&self) -> Period {
        self.calendar.period
    }

    /// Values and fills of the timeline region, starting at B1
    pub fn sheet_plan(&self) -> SheetPlan {
        let mut plan = SheetPlan::new();

        for (offset, header) in (0u32..).zip(&self.headers) {
            plan.set(
                CellRef::new(HEADER_ROW, NAME_COL + offset),
                CellValue::text(header.as_str()),
            );
        }

        for day in 1..=self.grid.columns {
            let at = CellRef::new(HEADER_ROW, GRID_COL + day - 1);
            plan.set(at, CellValue::text(day.to_string()));
            if self.calendar.is_weekend(day) {
                plan.fill(at, WEEKEND_FILL);
            } else {
                plan.clear_fill(at);
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            let sheet_row = FIRST_TASK_ROW + index as u32;
            plan.set(CellRef::new(sheet_row, NAME_COL), CellValue::text(row.name.as_str()));
            plan.set(
                CellRef::new(sheet_row, NAME_COL + 1),
                CellValue::text(row.start_label.as_str()),
            );
            plan.set(
                CellRef::new(sheet_row, NAME_COL + 2),
                CellValue::text(row.end_label.as_str()),
            );

            for day in 1..=self.grid.columns {
                let at = CellRef::new(sheet_row, GRID_COL + day - 1);
                if self.grid.is_marked(index, day) {
                    plan.set(at, CellValue::text(self.grid.cell(index, day)));
                    plan.fill(at, TASK_FILL);
                } else {
                    plan.set(at, CellValue::Empty);
                    plan.clear_fill(at);
                }
            }
        }

        plan
    }

    pub fn summary(&self) -> TimelineSummary {
        let period = self.period();
        TimelineSummary {
            period: period.to_string(),
            month: period.month_name().to_string(),
            year: period.year,
            days_in_month: self.calendar.days_in_month,
            weekend_days: self.calendar.weekend_days.iter().copied().collect(),
            output_file: period.output_file_name(),
            tasks: self
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| TaskSummary {
                    name: row.name.clone(),
                    start: row.start_label.clone(),
                    end: row.end_label.clone(),
                    days: self.grid.marked_days(index),
                })
                .collect(),
        }
    }
}

/// Render every task's start and end day as a full date.
///
/// Fails on the first day that is not a date of the period.
fn format_rows(tasks: &[Task], calendar: &MonthCalendar) -> Result<Vec<TimelineRow>, TimelineError> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let label = |day: u32| {
                calendar
                    .format_day(day)
                    .ok_or_else(|| TimelineError::DayOutOfRange {
                        row: index + FIRST_TASK_ROW as usize,
                        task: task.name.clone(),
                        day,
                        period: calendar.period,
                    })
            };
            Ok(TimelineRow {
                name: task.name.clone(),
                start_day: task.start_day,
                end_day: task.end_day,
                start_label: label(task.start_day)?,
                end_label: label(task.end_day)?,
            })
        })
        .collect()
}

/// Serializable overview of a generated timeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub period: String,
    pub month: String,
    pub year: i32,
    pub days_in_month: u32,
    pub weekend_days: Vec<u32>,
    pub output_file: String,
    pub tasks: Vec<TaskSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub name: String,
    pub start: String,
    pub end: String,
    pub days: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MARKER;
    use pretty_assertions::assert_eq;

    fn sample_table() -> TaskTable {
        let mut table = TaskTable::new(["Task", "Start Date", "End Date"]);
        table.tasks.push(Task::new("Design", 2, 5));
        table.tasks.push(Task::new("Build", 4, 10));
        table
    }

    fn september() -> Period {
        Period::new(9, 2024).unwrap()
    }

    #[test]
    fn build_formats_dates() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        assert_eq!(timeline.rows[0].start_label, "Monday, 02 September 2024");
        assert_eq!(timeline.rows[0].end_label, "Thursday, 05 September 2024");
        assert_eq!(timeline.rows[1].end_label, "Tuesday, 10 September 2024");
    }

    #[test]
    fn build_rejects_day_outside_month() {
        let mut table = sample_table();
        table.tasks.push(Task::new("Wrap-up", 28, 31));

        let err = Timeline::build(&table, september(), GridWidth::Full).unwrap_err();
        match err {
            TimelineError::DayOutOfRange { row, task, day, .. } => {
                assert_eq!(row, 4);
                assert_eq!(task, "Wrap-up");
                assert_eq!(day, 31);
            }
        }
    }

    #[test]
    fn build_rejects_day_zero() {
        let mut table = TaskTable::new(["Task", "Start", "End"]);
        table.tasks.push(Task::new("Zero", 0, 3));
        assert!(Timeline::build(&table, september(), GridWidth::Full).is_err());
    }

    #[test]
    fn plan_header_row() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let plan = timeline.sheet_plan();

        assert_eq!(plan.value(CellRef::new(1, 2)), Some(&CellValue::text("Task")));
        assert_eq!(plan.value(CellRef::new(1, 4)), Some(&CellValue::text("End Date")));
        assert_eq!(plan.value(CellRef::new(1, GRID_COL)), Some(&CellValue::text("1")));
        assert_eq!(
            plan.value(CellRef::new(1, GRID_COL + 30)),
            Some(&CellValue::text("31"))
        );
        assert_eq!(plan.value(CellRef::new(1, GRID_COL + 31)), None);
    }

    #[test]
    fn plan_weekend_fills_match_calendar() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let plan = timeline.sheet_plan();

        let weekend_cols: Vec<u32> = plan
            .fills
            .iter()
            .filter(|(at, fill)| at.row == HEADER_ROW && **fill == WEEKEND_FILL)
            .map(|(at, _)| at.col - GRID_COL + 1)
            .collect();
        assert_eq!(weekend_cols, vec![1, 7, 8, 14, 15, 21, 22, 28, 29]);

        // Weekday headers are explicitly unshaded
        let weekday_cols: Vec<u32> = plan
            .unfilled
            .iter()
            .filter(|at| at.row == HEADER_ROW)
            .map(|at| at.col - GRID_COL + 1)
            .collect();
        assert_eq!(weekday_cols.len(), 31 - 9);
        assert!(weekday_cols.iter().all(|day| !weekend_cols.contains(day)));
    }

    #[test]
    fn plan_task_fills_match_spans() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let plan = timeline.sheet_plan();

        for (row, expected) in [(2u32, 2..=5u32), (3, 4..=10)] {
            for day in 1..=31 {
                let at = CellRef::new(row, GRID_COL + day - 1);
                if expected.contains(&day) {
                    assert_eq!(plan.fill_at(at), Some(TASK_FILL), "{}", at.a1());
                    assert_eq!(plan.value(at), Some(&CellValue::text(MARKER)));
                } else {
                    assert_eq!(plan.fill_at(at), None, "{}", at.a1());
                    assert_eq!(plan.value(at), Some(&CellValue::Empty));
                    assert!(plan.unfilled.contains(&at), "{}", at.a1());
                }
            }
        }
    }

    #[test]
    fn trimmed_grid_matches_month_length() {
        let timeline =
            Timeline::build(&sample_table(), september(), GridWidth::MonthLength).unwrap();
        let plan = timeline.sheet_plan();
        assert_eq!(timeline.grid.columns, 30);
        assert!(plan.value(CellRef::new(1, GRID_COL + 29)).is_some());
        assert!(plan.value(CellRef::new(1, GRID_COL + 30)).is_none());
    }

    #[test]
    fn plan_column_widths() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let widths = timeline.sheet_plan().column_widths();

        // "Design" (6) + 3
        assert_eq!(widths[&NAME_COL], 9.0);
        // "Wednesday, 04 September 2024" (28) + 3
        assert_eq!(widths[&(NAME_COL + 1)], 31.0);
        // "Thursday, 05 September 2024" (27) + 3
        assert_eq!(widths[&(NAME_COL + 2)], 30.0);
        // day "1" and marker (1) + 3
        assert_eq!(widths[&GRID_COL], 4.0);
        // day "10" (2) + 3
        assert_eq!(widths[&(GRID_COL + 9)], 5.0);
        assert_eq!(widths[&(GRID_COL + 30)], 5.0);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let a = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let b = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        assert_eq!(a.sheet_plan(), b.sheet_plan());
    }

    #[test]
    fn summary_serializes() {
        let timeline = Timeline::build(&sample_table(), september(), GridWidth::Full).unwrap();
        let summary = timeline.summary();
        assert_eq!(summary.output_file, "Monthly Timeline September 2024.xlsx");
        assert_eq!(summary.tasks[1].days, vec![4, 5, 6, 7, 8, 9, 10]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["period"], "09-2024");
        assert_eq!(json["days_in_month"], 30);
        assert_eq!(json["tasks"][0]["name"], "Design");
    }
}
