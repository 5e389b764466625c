use serde::Serialize;
use utoipa::ToSchema;

/// 헬스체크 응답
#[derive(Serialize, Debug, ToSchema)]
pub struct HealthStatus {
    /// healthy / degraded / unhealthy
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    /// 응답은 하지만 느린 상태
    Degraded,
    Unhealthy,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthChecks {
    pub database: CheckResult,
}

/// 개별 의존성 체크 결과
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 3)]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, error: String) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some(error),
        }
    }

    pub fn timeout(limit_ms: u64) -> Self {
        Self {
            status: false,
            latency_ms: Some(limit_ms),
            error: Some("Timeout".to_string()),
        }
    }
}

/// 루트 경로 응답
#[derive(Serialize, Debug, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "healing-server")]
    pub name: &'static str,
    pub version: &'static str,
    #[schema(example = "/swagger-ui")]
    pub docs: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_state_should_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthState::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn check_result_should_skip_none_fields() {
        let json = serde_json::to_string(&CheckResult::success(4)).unwrap();
        assert!(json.contains("\"latency_ms\":4"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn timeout_should_report_failure() {
        let result = CheckResult::timeout(3000);
        assert!(!result.status);
        assert_eq!(result.error.as_deref(), Some("Timeout"));
    }
}
