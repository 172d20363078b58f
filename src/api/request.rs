//! Request types for the VR benefit engine API.

use serde::{Deserialize, Serialize};

/// Request body for the `/calculate` endpoint.
///
/// # Example
///
/// ```
/// use vr_engine::api::CalculationRequest;
///
/// let request: CalculationRequest =
///     serde_json::from_str(r#"{"month": 5, "year": 2025}"#).unwrap();
/// assert_eq!(request.month, 5);
/// assert!(!request.publish);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Target month, 1-12.
    pub month: u32,
    /// Target year.
    pub year: i32,
    /// Whether to replace the published table with the result.
    #[serde(default)]
    pub publish: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_flag_parsed() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"month": 12, "year": 2024, "publish": true}"#).unwrap();
        assert_eq!(request.month, 12);
        assert_eq!(request.year, 2024);
        assert!(request.publish);
    }

    #[test]
    fn test_missing_year_rejected() {
        let result: Result<CalculationRequest, _> = serde_json::from_str(r#"{"month": 5}"#);
        assert!(result.is_err());
    }
}
