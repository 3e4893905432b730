//! Day grid: one column per day, one row per task

use crate::calendar::{MonthCalendar, MAX_DAYS};
use crate::Task;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Value stamped into a grid cell on every day a task is active
pub const MARKER: &str = " ";

/// How many day columns the grid carries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridWidth {
    /// Always 31 columns, regardless of month length
    #[default]
    Full,
    /// Exactly as many columns as the month has days
    MonthLength,
}

impl GridWidth {
    pub fn columns(self, calendar: &MonthCalendar) -> u32 {
        match self {
            Self::Full => MAX_DAYS,
            Self::MonthLength => calendar.days_in_month,
        }
    }
}

/// Task-by-day grid; `true` cells hold the marker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGrid {
    pub columns: u32,
    rows: Vec<Vec<bool>>,
}

impl DayGrid {
    /// Empty grid with `rows` task rows and `columns` day columns
    pub fn new(rows: usize, columns: u32) -> Self {
        Self {
            columns,
            rows: vec![vec![false; columns as usize]; rows],
        }
    }

    /// Stamp every task's span into its row.
    ///
    /// Days outside the month (or beyond the grid) are never marked.
    pub fn mark_tasks(mut self, tasks: &[Task], calendar: &MonthCalendar) -> Self {
        for (row, task) in self.rows.iter_mut().zip(tasks) {
            if task.start_day > task.end_day {
                warn!(
                    task = %task.name,
                    start = task.start_day,
                    end = task.end_day,
                    "task ends before it starts, nothing marked"
                );
                continue;
            }
            for day in task.days() {
                if calendar.contains(day) && day <= self.columns {
                    row[(day - 1) as usize] = true;
                }
            }
        }
        self
    }

    pub fn is_marked(&self, row: usize, day: u32) -> bool {
        day >= 1
            && self
                .rows
                .get(row)
                .and_then(|cells| cells.get((day - 1) as usize))
                .copied()
                .unwrap_or(false)
    }

    /// Marked day numbers of one row, ascending
    pub fn marked_days(&self, row: usize) -> Vec<u32> {
        (1..=self.columns).filter(|day| self.is_marked(row, *day)).collect()
    }

    /// Cell text for a grid position: the marker or empty
    pub fn cell(&self, row: usize, day: u32) -> &'static str {
        if self.is_marked(row, day) {
            MARKER
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Period;
    use pretty_assertions::assert_eq;

    fn september() -> MonthCalendar {
        MonthCalendar::new(Period::new(9, 2024).unwrap())
    }

    #[test]
    fn grid_width_columns() {
        let cal = september();
        assert_eq!(GridWidth::Full.columns(&cal), 31);
        assert_eq!(GridWidth::MonthLength.columns(&cal), 30);
    }

    #[test]
    fn marks_inclusive_span_only() {
        let cal = september();
        let tasks = vec![Task::new("Design", 2, 5), Task::new("Build", 4, 10)];
        let grid = DayGrid::new(tasks.len(), 31).mark_tasks(&tasks, &cal);

        assert_eq!(grid.marked_days(0), vec![2, 3, 4, 5]);
        assert_eq!(grid.marked_days(1), vec![4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(grid.cell(0, 2), MARKER);
        assert_eq!(grid.cell(0, 6), "");
    }

    #[test]
    fn single_day_task() {
        let cal = september();
        let tasks = vec![Task::new("Review", 30, 30)];
        let grid = DayGrid::new(1, 31).mark_tasks(&tasks, &cal);
        assert_eq!(grid.marked_days(0), vec![30]);
    }

    #[test]
    fn inverted_span_marks_nothing() {
        let cal = september();
        let tasks = vec![Task::new("Backwards", 10, 4)];
        let grid = DayGrid::new(1, 31).mark_tasks(&tasks, &cal);
        assert!(grid.marked_days(0).is_empty());
    }

    #[test]
    fn columns_past_month_end_stay_empty() {
        let cal = september();
        let tasks = vec![Task::new("Overrun", 28, 31)];
        let grid = DayGrid::new(1, 31).mark_tasks(&tasks, &cal);
        assert_eq!(grid.marked_days(0), vec![28, 29, 30]);
        assert!(!grid.is_marked(0, 31));
    }

    #[test]
    fn out_of_bounds_lookups_are_unmarked() {
        let grid = DayGrid::new(1, 31);
        assert!(!grid.is_marked(0, 0));
        assert!(!grid.is_marked(5, 1));
        assert!(!grid.is_marked(0, 40));
    }
}
