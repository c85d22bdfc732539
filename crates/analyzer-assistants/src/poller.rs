//! Run state machine driver
//!
//! A run moves through statuses owned by the remote service. [`RunPoller`]
//! fetches the run, classifies its status and keeps polling while the run is
//! ongoing:
//!
//! | Class        | Statuses                                    | Outcome              |
//! |--------------|---------------------------------------------|----------------------|
//! | `Ongoing`    | queued, in_progress, cancelling             | wait, fetch again    |
//! | `Returnable` | requires_action, completed                  | return the run       |
//! | `Failed`     | cancelled, failed, incomplete, expired      | `RunFailed` error    |
//!
//! There is no attempt limit and no overall timeout: how long a run takes is
//! up to the provider.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{AssistantError, AssistantsApi, Result, Run, StatusClass};

/// Minimum delay between two consecutive retrievals of a run
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polls a run until it reaches a returnable or failed status
pub struct RunPoller {
    api: Arc<dyn AssistantsApi>,
    interval: Duration,
}

impl RunPoller {
    /// Create a poller with the default interval
    pub fn new(api: Arc<dyn AssistantsApi>) -> Self {
        Self {
            api,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the delay between retrievals, never below [`DEFAULT_POLL_INTERVAL`]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(DEFAULT_POLL_INTERVAL);
        self
    }

    /// Delay between retrievals
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll the run until it settles
    ///
    /// Arguments are the run id first, then the id of the thread it belongs to.
    ///
    /// The returned run is always `requires_action` or `completed`; failure
    /// statuses are reported as [`AssistantError::RunFailed`] and unknown
    /// statuses as [`AssistantError::UnknownStatus`].
    #[instrument(skip(self))]
    pub async fn poll(&self, run_id: &str, thread_id: &str) -> Result<Run> {
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let run = self.api.retrieve_run(thread_id, run_id).await?;
            debug!(attempt, status = %run.status, "Polled run");

            match run.status.class()? {
                StatusClass::Ongoing => tokio::time::sleep(self.interval).await,
                StatusClass::Returnable => return Ok(run),
                StatusClass::Failed => {
                    if let Some(error) = &run.last_error {
                        warn!(code = %error.code, "Run failed: {}", error.message);
                    }
                    return Err(AssistantError::RunFailed(run.status));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RunStatus;
    use crate::testing::{FakeApi, run_with_status};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_ongoing_statuses_keep_polling_with_delay() {
        for ongoing in [RunStatus::Queued, RunStatus::InProgress, RunStatus::Cancelling] {
            let api = Arc::new(FakeApi::with_statuses(vec![
                ongoing.clone(),
                ongoing,
                RunStatus::Completed,
            ]));
            let poller = RunPoller::new(api.clone());

            let run = poller.poll("run_1", "thread_1").await.unwrap();
            assert_eq!(run.status, RunStatus::Completed);

            let retrievals = api.retrievals.lock().unwrap();
            assert_eq!(retrievals.len(), 3);
            for pair in retrievals.windows(2) {
                assert!(pair[1] - pair[0] >= DEFAULT_POLL_INTERVAL);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_returnable_statuses_return_immediately() {
        for returnable in [RunStatus::RequiresAction, RunStatus::Completed] {
            let api = Arc::new(FakeApi::with_statuses(vec![returnable.clone()]));
            let poller = RunPoller::new(api.clone());
            let started = Instant::now();

            let run = poller.poll("run_1", "thread_1").await.unwrap();

            assert_eq!(run, run_with_status(returnable));
            assert_eq!(api.retrieval_count(), 1);
            assert_eq!(started.elapsed(), Duration::ZERO);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_statuses_raise() {
        for failed in [
            RunStatus::Cancelled,
            RunStatus::Failed,
            RunStatus::Incomplete,
            RunStatus::Expired,
        ] {
            let api = Arc::new(FakeApi::with_statuses(vec![
                RunStatus::InProgress,
                failed.clone(),
            ]));
            let poller = RunPoller::new(api.clone());

            let result = poller.poll("run_1", "thread_1").await;

            match result {
                Err(AssistantError::RunFailed(status)) => assert_eq!(status, failed),
                other => panic!("Expected RunFailed, got {other:?}"),
            }
            assert_eq!(api.retrieval_count(), 2);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_status_is_a_hard_error() {
        let api = Arc::new(FakeApi::with_statuses(vec![RunStatus::Unknown(
            "paused".to_string(),
        )]));
        let poller = RunPoller::new(api);

        let result = poller.poll("run_1", "thread_1").await;
        assert!(matches!(result, Err(AssistantError::UnknownStatus(s)) if s == "paused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_interval() {
        let api = Arc::new(FakeApi::with_statuses(vec![
            RunStatus::Queued,
            RunStatus::RequiresAction,
        ]));
        let poller = RunPoller::new(api.clone()).with_interval(Duration::from_secs(5));
        let started = Instant::now();

        poller.poll("run_1", "thread_1").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
        assert_eq!(poller.interval(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_never_below_minimum() {
        let api = Arc::new(FakeApi::with_statuses(vec![
            RunStatus::Queued,
            RunStatus::Queued,
            RunStatus::Completed,
        ]));
        let poller = RunPoller::new(api.clone()).with_interval(Duration::ZERO);
        assert_eq!(poller.interval(), DEFAULT_POLL_INTERVAL);

        poller.poll("run_1", "thread_1").await.unwrap();

        let retrievals = api.retrievals.lock().unwrap();
        assert_eq!(retrievals.len(), 3);
        for pair in retrievals.windows(2) {
            assert!(pair[1] - pair[0] >= DEFAULT_POLL_INTERVAL);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_takes_run_id_first() {
        let api = Arc::new(FakeApi::with_statuses(vec![RunStatus::Completed]));
        let poller = RunPoller::new(api.clone());

        poller.poll("run_7", "thread_3").await.unwrap();

        let retrieved = api.retrieved.lock().unwrap();
        assert_eq!(
            *retrieved,
            [("thread_3".to_string(), "run_7".to_string())]
        );
    }
}
