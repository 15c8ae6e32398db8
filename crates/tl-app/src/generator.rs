use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tl_core::{GenerationRequest, Job, JobStatus, WallpaperImage, progress};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::events::GenEvent;
use crate::generator::backend::PredictionBackend;

pub mod backend;

/// Submits predictions and drives them to a terminal state.
pub struct Generator {
    backend: Arc<dyn PredictionBackend>,
    poll_interval: Duration,
    transport_retries: u32,
}

impl Generator {
    pub fn new(backend: Arc<dyn PredictionBackend>, config: &ClientConfig) -> Self {
        Self {
            backend,
            poll_interval: config.poll_interval,
            transport_retries: config.transport_retries,
        }
    }

    /// Creates the prediction. Never returns a job that is already terminal.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<Job, AppError> {
        let job = self.backend.create(request).await?;

        if job.status.is_terminal() {
            return Err(AppError::Submission {
                detail: format!("prediction {} was created already {}", job.id, job.status),
            });
        }

        info!(job_id = %job.id, status = %job.status, "prediction submitted");
        Ok(job)
    }

    /// Submit then poll, reporting every step on `events`. The wallpaper is
    /// published on `wallpaper` only when the job succeeds.
    pub async fn generate(
        &self,
        request: GenerationRequest,
        wallpaper: &watch::Sender<Option<WallpaperImage>>,
        events: &mpsc::Sender<GenEvent>,
        cancel: &CancellationToken,
    ) -> Result<Job, AppError> {
        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            res = self.submit(&request) => res,
        };

        let job = match submitted {
            Ok(job) => job,
            Err(e) => {
                notify(events, GenEvent::Failed { job_id: None, detail: e.detail() }).await;
                return Err(e);
            }
        };

        notify(events, GenEvent::Submitted { job: job.clone() }).await;
        self.poll(job, wallpaper, events, cancel).await
    }

    /// Polls until the job is terminal. Requests are strictly sequential:
    /// each one waits for the previous response plus one interval.
    pub async fn poll(
        &self,
        mut job: Job,
        wallpaper: &watch::Sender<Option<WallpaperImage>>,
        events: &mpsc::Sender<GenEvent>,
        cancel: &CancellationToken,
    ) -> Result<Job, AppError> {
        let id = job.id.clone();

        while !job.status.is_terminal() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(job_id = %id, "polling cancelled");
                    return Err(AppError::Cancelled);
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(job_id = %id, "polling cancelled");
                    return Err(AppError::Cancelled);
                }
                res = self.fetch_status(&id) => res,
            };

            job = match fetched {
                Ok(job) => job,
                Err(e) => {
                    warn!(job_id = %id, error = %e, "status query failed");
                    let detail = e.detail();
                    notify(events, GenEvent::Failed { job_id: Some(id), detail }).await;
                    return Err(e);
                }
            };

            let estimate = progress::parse_logs(job.logs.as_deref());
            debug!(job_id = %id, status = %job.status, progress = ?estimate, "polled");
            if !job.status.is_terminal() {
                notify(events, GenEvent::Progress { job_id: id.clone(), estimate }).await;
            }
        }

        match job.status {
            JobStatus::Succeeded => {
                let Some(image) = job.wallpaper() else {
                    let detail = "prediction succeeded without an output image".to_string();
                    let failed = GenEvent::Failed { job_id: Some(id), detail: detail.clone() };
                    notify(events, failed).await;
                    return Err(AppError::Poll { detail });
                };

                wallpaper.send_replace(Some(image.clone()));
                info!(job_id = %id, image = %image, "prediction succeeded");

                let completed_at = Utc::now();
                notify(events, GenEvent::Ready { job_id: id, image, completed_at }).await;
                Ok(job)
            }
            _ => {
                let detail = job.failure_detail();
                warn!(job_id = %id, detail = %detail, "prediction failed");
                let failed = GenEvent::Failed { job_id: Some(id), detail: detail.clone() };
                notify(events, failed).await;
                Err(AppError::Poll { detail })
            }
        }
    }

    // Only transport failures are retried; an answer from the service is
    // final whatever it says.
    async fn fetch_status(&self, id: &str) -> Result<Job, AppError> {
        let mut attempt = 0;
        loop {
            match self.backend.get(id).await {
                Err(e) if e.is_transport() && attempt < self.transport_retries => {
                    attempt += 1;
                    warn!(job_id = id, attempt, error = %e, "status query unreachable, retrying");
                    tokio::time::sleep(self.poll_interval).await;
                }
                res => return res,
            }
        }
    }
}

// The receiving side may already be gone; that is not an error here.
async fn notify(events: &mpsc::Sender<GenEvent>, event: GenEvent) {
    let _ = events.send(event).await;
}
