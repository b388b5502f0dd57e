use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub version: String,
}

/// Health check shared by every API surface.
pub struct HealthService;

impl HealthService {
    /// Reports the service as healthy along with the crate version.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_healthy_with_crate_version() {
        let res = HealthService::check_health();
        assert_eq!(res.status, "healthy");
        assert_eq!(res.version, env!("CARGO_PKG_VERSION"));
    }
}
