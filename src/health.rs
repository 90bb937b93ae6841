//! Startup connectivity check.

use crate::config::HealthCheckConfig;
use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt};

/// Confirms the database answers a trivial query before continuing.
///
/// Waits the configured initial delay, then retries `RETURN 1` with a
/// linear back-off until it succeeds or `max_attempts` attempts have failed.
/// The last failure is returned inside [`AppError::HealthCheckFailed`].
pub async fn wait_until_ready<E: CypherExecutor>(
    executor: &E,
    policy: &HealthCheckConfig,
) -> Result<(), AppError> {
    tracing::info!("Waiting for Neo4j to start...");
    tokio::time::sleep(policy.initial_delay()).await;

    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        match executor.query("RETURN 1").run().await {
            Ok(()) => {
                tracing::info!(attempts = attempts + 1, "Neo4j is available");
                return Ok(());
            }
            Err(e) => {
                attempts += 1;
                if attempts >= max_attempts {
                    tracing::error!(attempts, error = %e, "Giving up on Neo4j connection");
                    return Err(AppError::HealthCheckFailed {
                        attempts,
                        source: Box::new(e),
                    });
                }

                let wait = policy.backoff(attempts);
                tracing::error!(
                    attempts,
                    wait_secs = wait.as_secs(),
                    error = %e,
                    "Failed connection, retrying"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Params, RowStream};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyExecutor {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait::async_trait]
    impl CypherExecutor for FlakyExecutor {
        async fn execute_cypher(
            &self,
            cypher: &str,
            _params: Params,
        ) -> Result<RowStream<'_>, AppError> {
            assert_eq!(cypher, "RETURN 1");
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                return Err(AppError::Internal(format!("connection refused #{}", call)));
            }
            Ok(Box::pin(futures::stream::empty()))
        }
    }

    fn policy(max_attempts: u32) -> HealthCheckConfig {
        HealthCheckConfig {
            initial_delay_secs: 0,
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let executor = FlakyExecutor {
            failures: 2,
            calls: AtomicU32::new(0),
        };

        wait_until_ready(&executor, &policy(3)).await.unwrap();
        assert_eq!(executor.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_with_last_error() {
        let executor = FlakyExecutor {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        };

        let err = wait_until_ready(&executor, &policy(3)).await.unwrap_err();

        assert_eq!(executor.calls.load(Ordering::SeqCst), 3);
        match err {
            AppError::HealthCheckFailed { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source.to_string(), "Internal error: connection refused #3");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_tries_once() {
        let executor = FlakyExecutor {
            failures: 0,
            calls: AtomicU32::new(0),
        };

        wait_until_ready(&executor, &policy(0)).await.unwrap();
        assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
    }
}
