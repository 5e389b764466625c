use std::sync::OnceLock;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};

static START_TIME: OnceLock<Instant> = OnceLock::new();

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// 이 시간 이상 걸리면 Degraded
const DEGRADED_THRESHOLD: Duration = Duration::from_millis(500);

/// 서버 시작 시간 기록 (main에서 한 번 호출)
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub async fn check_health(db: &DatabaseConnection) -> HealthStatus {
    let database = check_database(db).await;

    HealthStatus {
        status: determine_health_state(&database),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
        checks: HealthChecks { database },
    }
}

fn determine_health_state(check: &CheckResult) -> HealthState {
    if !check.status {
        return HealthState::Unhealthy;
    }
    match check.latency_ms {
        Some(latency) if latency >= DEGRADED_THRESHOLD.as_millis() as u64 => HealthState::Degraded,
        _ => HealthState::Healthy,
    }
}

async fn check_database(db: &DatabaseConnection) -> CheckResult {
    let start = Instant::now();
    let result = timeout(DB_CHECK_TIMEOUT, db.ping()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(())) => CheckResult::success(latency_ms),
        Ok(Err(e)) => {
            tracing::warn!(latency_ms, error = %e, "database health check failed");
            CheckResult::failure(latency_ms, e.to_string())
        }
        Err(_) => {
            tracing::warn!("database health check timed out");
            CheckResult::timeout(DB_CHECK_TIMEOUT.as_millis() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_check_should_be_unhealthy() {
        let check = CheckResult::failure(10, "connection refused".into());
        assert_eq!(determine_health_state(&check), HealthState::Unhealthy);
    }

    #[test]
    fn slow_check_should_be_degraded() {
        assert_eq!(
            determine_health_state(&CheckResult::success(800)),
            HealthState::Degraded
        );
        assert_eq!(
            determine_health_state(&CheckResult::success(5)),
            HealthState::Healthy
        );
    }

    #[test]
    fn init_start_time_should_set_once() {
        init_start_time();
        let first = START_TIME.get().copied();
        init_start_time();
        assert_eq!(first, START_TIME.get().copied());
    }
}
