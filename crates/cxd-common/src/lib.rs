//! Common types and utilities for the cxd desugaring generator.
//!
//! This crate provides the foundational types shared across the cxd crates:
//! - Source locations (`FileId`, `SourceLoc`)
//! - Diagnostics (`Diagnostic`, `DiagnosticSink`, `Severity`)
//! - Internal-name synthesis (`NameGenerator`)

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};

pub mod names;
pub use names::NameGenerator;

pub mod position;
pub use position::{FileId, SourceLoc};
