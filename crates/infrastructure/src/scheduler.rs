//! Cron-based render scheduler
//!
//! Wraps `tokio-cron-scheduler` in an object that owns its own lifecycle:
//! startup wires the recurring render task, shutdown is a method call from
//! the signal handler rather than a global timer handle.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info};

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid cron expression
    #[error("Invalid cron expression: {0}")]
    InvalidCronExpression(String),

    /// Internal scheduler error
    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl From<JobSchedulerError> for SchedulerError {
    fn from(err: JobSchedulerError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Cron expression for a fixed minute interval
///
/// `interval_minutes` should divide an hour evenly; other values fire on
/// the wall-clock minutes divisible by the interval.
#[must_use]
pub fn every_minutes(interval_minutes: u32) -> String {
    format!("0 */{interval_minutes} * * * *")
}

/// Recurring task scheduler owning its own shutdown
pub struct RenderScheduler {
    scheduler: AsyncMutex<JobScheduler>,
    tasks: Arc<RwLock<Vec<String>>>,
    running: AtomicBool,
}

impl std::fmt::Debug for RenderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderScheduler")
            .field("running", &self.running.load(Ordering::Relaxed))
            .field("task_count", &self.tasks.read().len())
            .finish_non_exhaustive()
    }
}

impl RenderScheduler {
    /// Create and start the scheduler
    pub async fn new() -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;
        let instance = Self {
            scheduler: AsyncMutex::new(scheduler),
            tasks: Arc::new(RwLock::new(Vec::new())),
            running: AtomicBool::new(false),
        };

        instance.scheduler.lock().await.start().await?;
        instance.running.store(true, Ordering::Relaxed);

        info!("render scheduler started");
        Ok(instance)
    }

    /// Check if the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Number of scheduled tasks
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.read().len()
    }

    /// Add a recurring task
    ///
    /// # Arguments
    /// * `name` - Task name used in log lines
    /// * `cron_expression` - 6-field cron expression (sec min hour dom mon dow)
    /// * `task` - Async task function; an `Err` is logged, never fatal
    pub async fn add_task<F, Fut>(
        &self,
        name: &str,
        cron_expression: &str,
        task: F,
    ) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        cron_expression.parse::<cron::Schedule>().map_err(|e| {
            SchedulerError::InvalidCronExpression(format!("{cron_expression}: {e}"))
        })?;

        let task_name = name.to_string();
        let job = Job::new_async(cron_expression, move |_uuid, _lock| {
            let name = task_name.clone();
            let task_future = task();

            Box::pin(async move {
                debug!(task = %name, "starting scheduled task");
                let start = std::time::Instant::now();
                let result = task_future.await;
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match result {
                    Ok(()) => {
                        info!(task = %name, duration_ms, "task completed");
                    }
                    Err(e) => {
                        error!(task = %name, error = %e, duration_ms, "task failed");
                    }
                }
            })
        })
        .map_err(|e| SchedulerError::InvalidCronExpression(e.to_string()))?;

        self.scheduler.lock().await.add(job).await?;
        self.tasks.write().push(name.to_string());

        info!(task = %name, cron = %cron_expression, "task scheduled");
        Ok(())
    }

    /// Stop the scheduler; scheduled tasks stop firing immediately
    ///
    /// In-flight task executions are not awaited.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        if !self.running.swap(false, Ordering::Relaxed) {
            debug!("scheduler already stopped");
            return Ok(());
        }

        self.scheduler.lock().await.shutdown().await?;
        info!("render scheduler stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn scheduler_starts_running() {
        let scheduler = RenderScheduler::new().await.expect("starts");
        assert!(scheduler.is_running());
        assert_eq!(scheduler.task_count(), 0);
        scheduler.shutdown().await.expect("stops");
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn shutdown_twice_is_a_noop() {
        let scheduler = RenderScheduler::new().await.expect("starts");
        scheduler.shutdown().await.expect("stops");
        scheduler.shutdown().await.expect("second stop is fine");
    }

    #[tokio::test]
    async fn add_task_registers_it() {
        let scheduler = RenderScheduler::new().await.expect("starts");
        scheduler
            .add_task("render", &every_minutes(10), || async { Ok(()) })
            .await
            .expect("adds");
        assert_eq!(scheduler.task_count(), 1);
        scheduler.shutdown().await.expect("stops");
    }

    #[tokio::test]
    async fn invalid_cron_is_rejected() {
        let scheduler = RenderScheduler::new().await.expect("starts");
        let result = scheduler
            .add_task("bad", "not a cron", || async { Ok(()) })
            .await;
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidCronExpression(_))
        ));
        scheduler.shutdown().await.expect("stops");
    }

    #[tokio::test]
    async fn scheduled_task_executes() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let scheduler = RenderScheduler::new().await.expect("starts");
        scheduler
            .add_task("counter", "* * * * * *", move || {
                let counter = Arc::clone(&counter_clone);
                async move {
                    counter.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                }
            })
            .await
            .expect("adds");

        sleep(Duration::from_secs(2)).await;
        assert!(counter.load(Ordering::Relaxed) >= 1);

        scheduler.shutdown().await.expect("stops");
    }

    #[tokio::test]
    async fn failing_task_does_not_stop_scheduler() {
        let scheduler = RenderScheduler::new().await.expect("starts");
        scheduler
            .add_task("failing", "* * * * * *", || async {
                Err("intentional failure".to_string())
            })
            .await
            .expect("adds");

        sleep(Duration::from_secs(2)).await;
        assert!(scheduler.is_running());

        scheduler.shutdown().await.expect("stops");
    }

    #[test]
    fn every_minutes_builds_six_field_cron() {
        assert_eq!(every_minutes(10), "0 */10 * * * *");
        assert!(every_minutes(10).parse::<cron::Schedule>().is_ok());
        assert!(every_minutes(1).parse::<cron::Schedule>().is_ok());
    }
}
