//! Core data models for the VR benefit engine.
//!
//! This module contains all the domain models used throughout the engine.

mod benefit_row;
mod competency;
mod pipeline_result;
mod worker;

pub use benefit_row::{BenefitRow, PayableDaysRule};
pub use competency::Competency;
pub use pipeline_result::{
    AuditStep, AuditTrace, DataQualityWarning, PipelineResult, RunSummary, Severity, WarningCode,
};
pub use worker::WorkerRecord;
