use serde::Serialize;
use utoipa::ToSchema;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// Response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Game store backend currently installed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl HealthResponse {
    /// Game store installed and answering.
    pub fn ok(store: &'static str) -> Self {
        Self {
            status: HealthStatus::Ok,
            store: Some(store.to_string()),
        }
    }

    /// No usable game store.
    pub fn degraded(store: Option<&'static str>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            store: store.map(str::to_string),
        }
    }
}
