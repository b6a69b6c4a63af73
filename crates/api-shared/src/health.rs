use crate::dto::HealthRes;

/// Health reporting for the REST API.
///
/// The engine holds no connections and probes no dependencies; a process
/// that can answer is healthy, so the check is a constant payload.
pub struct HealthService;

impl HealthService {
    /// Health snapshot served by the `/health` endpoint.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "E2S is alive".into(),
        }
    }
}
