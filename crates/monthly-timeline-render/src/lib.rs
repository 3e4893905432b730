//! # monthly-timeline-render
//!
//! Rendering backends for monthly timelines.
//!
//! This crate provides:
//! - `OverlayRenderer`: copies the input workbook and overlays the timeline
//!   onto the copy, keeping whatever surrounds the table
//! - `ExcelRenderer`: writes the timeline into a fresh single-sheet workbook
//!
//! Both consume a [`SheetPlan`](monthly_timeline_core::SheetPlan) and never
//! decide styling on their own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use monthly_timeline_core::Renderer;
//! use monthly_timeline_render::{ExcelRenderer, OverlayRenderer};
//!
//! let plan = timeline.sheet_plan();
//!
//! // Overlay onto a copy of the input
//! let output = OverlayRenderer::new("monthly-schedule.xlsx", "Monthly Timeline September 2024.xlsx")
//!     .render(&plan)?;
//!
//! // Fresh workbook
//! let xlsx_bytes = ExcelRenderer::new().render(&plan)?;
//! std::fs::write("timeline.xlsx", xlsx_bytes)?;
//! ```

pub mod excel;
pub mod overlay;

pub use excel::ExcelRenderer;
pub use overlay::{apply_plan, target_sheet_index, OverlayRenderer};
