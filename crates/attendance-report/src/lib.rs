//! Report layer for the daybreak attendance pipeline.
//!
//! Joins the merged session dataset with the roster into cumulative and
//! weekly views and renders the two output artifacts: an XLSX workbook
//! with cumulative counts and a Markdown weekly report.

pub mod builder;
pub mod markdown;
pub mod week;
pub mod xlsx;

pub use attendance_core as core;
