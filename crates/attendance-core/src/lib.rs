//! Core domain model for the daybreak attendance pipeline.
//!
//! Defines the check-in data model (windows, events, session records),
//! the run configuration, the session validation rules, and the error
//! taxonomy shared by all crates in the workspace.

pub mod config;
pub mod error;
pub mod models;
pub mod validator;
