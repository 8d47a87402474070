//! Cron-style job scheduler using tokio-cron-scheduler.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use folio_infra::CachingBlogApi;

use super::SchedulerConfig;

/// Cron job scheduler wrapper.
pub struct Scheduler {
    inner: JobScheduler,
    config: SchedulerConfig,
}

impl Scheduler {
    pub async fn new(config: SchedulerConfig) -> Result<Self, JobSchedulerError> {
        let inner = JobScheduler::new().await?;
        Ok(Self { inner, config })
    }

    /// Add a cron job.
    pub async fn add_cron<F, Fut>(
        &self,
        schedule: &str,
        task: F,
    ) -> Result<uuid::Uuid, JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let task = task.clone();
            Box::pin(async move {
                task().await;
            })
        })?;

        let id = self.inner.add(job).await?;
        tracing::info!(schedule = %schedule, job_id = %id, "Cron job registered");
        Ok(id)
    }

    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        if !self.config.enabled {
            tracing::info!("Scheduler disabled");
            return Ok(());
        }

        self.inner.start().await?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}

/// Periodically drop expired blog and comment cache entries.
pub async fn register_cache_sweep(
    scheduler: &Scheduler,
    api: Arc<CachingBlogApi>,
) -> Result<uuid::Uuid, JobSchedulerError> {
    let schedule = scheduler.config.cache_sweep_cron.clone();
    scheduler
        .add_cron(&schedule, move || {
            let api = api.clone();
            async move {
                let removed = api.cleanup_expired().await;
                let (blogs, comments) = api.stats().await;
                tracing::debug!(
                    removed,
                    cached_blogs = blogs.valid_entries,
                    cached_comments = comments.valid_entries,
                    "Cache sweep finished"
                );
            }
        })
        .await
}
