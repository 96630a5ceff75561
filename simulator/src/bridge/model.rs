use serde::{Deserialize, Serialize};
use wastecore::telemetry::Metrics;
use wastecore::DashboardView;

/// Body of `GET /dashboard`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub bridge: Metrics,
}

/// Body of `POST /classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub label: String,
}
