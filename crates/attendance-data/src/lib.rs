//! Data ingestion layer for the daybreak attendance pipeline.
//!
//! Responsible for discovering attendance exports, loading the roster,
//! reading spreadsheet cells, inferring day columns, extracting check-in
//! timestamps, and merging per-file results into one deduplicated dataset.

pub mod columns;
pub mod discovery;
pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod roster;
pub mod sheet;

pub use attendance_core as core;
