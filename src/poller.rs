//! Poll loop.
//!
//! Each cycle fetches statuses, validates the response, translates the
//! first work item and notifies the recipient. Any failure is logged,
//! reported to the recipient on a best-effort basis, and the loop carries
//! on after the retry period.

use crate::channels::Notifier;
use crate::error::Result;
use crate::homework;
use crate::practicum::StatusSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default pause between cycles (seconds).
pub const RETRY_PERIOD_SECS: u64 = 600;

/// Prefix of the message sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Drives fetch → validate → translate → notify on a fixed interval.
pub struct Poller {
    source: Arc<dyn StatusSource>,
    notifier: Notifier,
    /// Lower bound (Unix seconds) for work items reported by the API.
    cursor: i64,
    retry_period: Duration,
    advance_cursor: bool,
}

impl Poller {
    /// Create a poller whose cursor starts at the current time.
    pub fn new(source: Arc<dyn StatusSource>, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            cursor: chrono::Utc::now().timestamp(),
            retry_period: Duration::from_secs(RETRY_PERIOD_SECS),
            advance_cursor: false,
        }
    }

    /// Override the pause between cycles.
    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = retry_period;
        self
    }

    /// Start from an explicit cursor instead of "now".
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Move the cursor forward after every successful cycle.
    pub fn with_cursor_advance(mut self, enabled: bool) -> Self {
        self.advance_cursor = enabled;
        self
    }

    /// Current `from_date` value.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run forever: one cycle, then sleep, regardless of outcome.
    pub async fn run(mut self) {
        info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "polling started"
        );
        loop {
            // Failures are already logged and reported inside tick().
            let _ = self.tick().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Execute one cycle and apply the recovery policy.
    ///
    /// Returns the cycle outcome so callers can inspect the error kind; a
    /// failed cycle has already been logged and reported when this returns.
    pub async fn tick(&mut self) -> Result<String> {
        let outcome = self.run_cycle().await;
        if let Err(err) = &outcome {
            error!(code = err.code(), error = %err, "poll cycle failed");
            let report = format!("{FAILURE_PREFIX}{err}");
            if let Err(report_err) = self.notifier.notify(&report).await {
                error!(error = %report_err, "failure report was not delivered");
            }
        }
        outcome
    }

    /// Fetch, validate, translate and notify, stopping at the first failure.
    async fn run_cycle(&mut self) -> Result<String> {
        let response = self.source.fetch(self.cursor).await?;
        let item = homework::check_response(&response)?;
        let message = homework::parse_status(item)?;
        self.notifier.notify(&message).await?;
        debug!(cursor = self.cursor, "poll cycle completed");

        if self.advance_cursor {
            self.cursor = homework::current_date(&response)
                .unwrap_or_else(|| chrono::Utc::now().timestamp());
        }
        Ok(message)
    }
}
