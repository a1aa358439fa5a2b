//! # ranch-core
//!
//! Core types for the ranch camera events report.
//!
//! This crate is pure: it never talks to a warehouse. It provides:
//! - Entity structs for the rows the warehouse returns (ranch, camera activity,
//!   event type counts)
//! - Aggregation arithmetic (camera totals, event type percentages)
//! - The report document model and its assembler
//! - Cross-cutting error types

pub mod aggregate;
pub mod entities;
pub mod errors;
pub mod report;

pub use aggregate::{CameraSummary, EventTypeBreakdown, EventTypeShare, format_percentage};
pub use entities::{CameraActivity, EventTypeCount, Ranch, RanchName};
pub use errors::CoreError;
pub use report::{ReportDocument, Section, TableSection, TextSection};
