use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service name reported by health checks.
pub const SERVICE_NAME: &str = "todo-api";

/// Health check payload shared by the gateway and the combined runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub service: String,
}

/// Simple health service that can be used by both gRPC and REST APIs
///
/// This service provides a standardised way to check the health status of the todo API.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            service: SERVICE_NAME.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serialises_to_expected_shape() {
        let json = serde_json::to_value(HealthService::check_health()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "healthy", "service": "todo-api"})
        );
    }
}
