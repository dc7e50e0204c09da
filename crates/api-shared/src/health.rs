use crate::dto::HealthRes;

/// Liveness reporting for the HTTP API.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// The fixed liveness response; the service has no dependencies worth probing.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            message: "Remote Home Check Scorer is running".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serialises_to_contract() {
        let json = serde_json::to_value(HealthService::check_health()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "message": "Remote Home Check Scorer is running"
            })
        );
    }
}
