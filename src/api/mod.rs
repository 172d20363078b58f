//! HTTP API module for the VR benefit engine.
//!
//! A single endpoint, `POST /calculate`, runs the pipeline for a
//! caller-supplied competency and optionally publishes the result.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
