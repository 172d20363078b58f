//! Meal-voucher (VR) benefit engine
//!
//! This crate reconciles monthly payroll extracts (active workers, vacations,
//! terminations, admissions, per-state rates and working days, overseas and
//! leave-of-absence lists) into one row per eligible worker, computes the
//! payable days and benefit values for a target competency, and publishes
//! the resulting purchase table.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod reconciliation;
pub mod sources;
