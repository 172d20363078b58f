//! Configuration loading and management for the VR benefit engine.
//!
//! This module provides functionality to load the pipeline configuration
//! from YAML files: rule parameters, exclusion lists, the state table,
//! source extract layouts and extra holidays.
//!
//! # Example
//!
//! ```no_run
//! use vr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vr").unwrap();
//! println!("Publishing to: {}", config.config().publish().table_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ActiveWorkersColumns, AdmissionColumns, EngineMetadata, ExclusionConfig, ExtraHoliday,
    HolidaysFile, LeaveDaysColumns, NotedListColumns, PipelineConfig, PipelineFile,
    PublishConfig, RulesConfig, SourceLayout, SourcesConfig, StateRateColumns,
    StateWorkdaysColumns, StatesFile, TerminationColumns, default_states,
};
