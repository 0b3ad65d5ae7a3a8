//! Media processing backends.
//!
//! [`MediaProcessingBackend`] is the seam between the editor and whatever
//! renders its output. Two implementations are provided:
//! - [`SimulatedBackend`] reports fixed-step progress and always completes.
//!   It stands in for a local renderer during development and tests.
//! - [`ApiBackend`] sends export jobs to the generation backend's video
//!   assembly endpoint. Backend failures propagate to the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use clipstudio_client::VideoService;
use clipstudio_models::{JobId, JobState, TrackId, VideoGenerateRequest, VideoResult};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, info_span, Instrument};

use crate::error::{EditorError, EditorResult};

/// Default delay between simulated progress steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(200);

/// Progress added per simulated step.
pub const DEFAULT_STEP_PERCENT: u8 = 10;

/// Work the editor can hand to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessingJob {
    /// Assemble a video from images and optional narration
    Export {
        images: Vec<String>,
        audio_base64: Option<String>,
        duration_secs: u32,
    },
    /// Render a filter onto one track
    ApplyFilter { track_id: TrackId, filter: String },
    /// Cut a track down to `[start_secs, end_secs)`
    Trim {
        track_id: TrackId,
        start_secs: f64,
        end_secs: f64,
    },
}

impl ProcessingJob {
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingJob::Export { .. } => "export",
            ProcessingJob::ApplyFilter { .. } => "apply_filter",
            ProcessingJob::Trim { .. } => "trim",
        }
    }

    /// Reject jobs no backend could run.
    pub fn validate(&self) -> EditorResult<()> {
        match self {
            ProcessingJob::Export { images, .. } if images.is_empty() => Err(
                EditorError::NothingToExport("export job has no images".to_string()),
            ),
            ProcessingJob::Trim {
                start_secs,
                end_secs,
                ..
            } if !start_secs.is_finite()
                || !end_secs.is_finite()
                || *start_secs < 0.0
                || end_secs <= start_secs =>
            {
                Err(EditorError::InvalidTrim {
                    start: *start_secs,
                    end: *end_secs,
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<VideoGenerateRequest> for ProcessingJob {
    fn from(request: VideoGenerateRequest) -> Self {
        ProcessingJob::Export {
            images: request.images,
            audio_base64: request.audio_base64,
            duration_secs: request.duration,
        }
    }
}

/// What a completed job produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutput {
    Video(VideoResult),
    Track { track_id: TrackId },
}

/// Snapshot of a job's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
    pub id: JobId,
    pub state: JobState,
    /// 0-100
    pub progress_percent: u8,
    pub output: Option<JobOutput>,
}

impl JobHandle {
    fn pending() -> Self {
        Self {
            id: JobId::new(),
            state: JobState::Pending,
            progress_percent: 0,
            output: None,
        }
    }
}

/// A renderer the editor can hand jobs to.
#[async_trait]
pub trait MediaProcessingBackend: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &'static str;

    /// Start a job and return its initial handle.
    async fn process(&self, job: ProcessingJob) -> EditorResult<JobHandle>;

    /// Current handle for a previously started job.
    async fn status(&self, id: &JobId) -> EditorResult<JobHandle>;

    /// Drop a finished job and return its last handle. Running jobs are kept.
    async fn forget(&self, id: &JobId) -> EditorResult<JobHandle>;
}

// =============================================================================
// Simulated backend
// =============================================================================

/// Fixed-step progress simulator. Each job runs on its own task and publishes
/// its handle on a watch channel.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    step_delay: Duration,
    step_percent: u8,
    jobs: Arc<Mutex<HashMap<JobId, watch::Sender<JobHandle>>>>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl SimulatedBackend {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay,
            step_percent: DEFAULT_STEP_PERCENT,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Progress per step, clamped to 1..=100.
    pub fn with_step_percent(mut self, percent: u8) -> Self {
        self.step_percent = percent.clamp(1, 100);
        self
    }

    /// Watch a job's handle as it progresses.
    pub fn subscribe(&self, id: &JobId) -> EditorResult<watch::Receiver<JobHandle>> {
        let jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.get(id)
            .map(watch::Sender::subscribe)
            .ok_or_else(|| EditorError::UnknownJob(id.clone()))
    }

    /// Wait until the job reaches a terminal state.
    pub async fn wait(&self, id: &JobId) -> EditorResult<JobHandle> {
        let mut rx = self.subscribe(id)?;
        let handle = rx
            .wait_for(|h| h.state.is_terminal())
            .await
            .map_err(|_| EditorError::UnknownJob(id.clone()))?
            .clone();
        Ok(handle)
    }

    async fn run(
        tx: watch::Sender<JobHandle>,
        job: ProcessingJob,
        step_delay: Duration,
        step_percent: u8,
    ) {
        let mut progress: u8 = 0;
        while progress < 100 {
            tokio::time::sleep(step_delay).await;
            progress = progress.saturating_add(step_percent).min(100);
            tx.send_modify(|h| {
                h.state = JobState::Processing;
                h.progress_percent = progress;
            });
        }

        let output = simulated_output(&job, &tx.borrow().id);
        tx.send_modify(|h| {
            h.state = JobState::Completed;
            h.output = Some(output);
        });
        info!(job_id = %tx.borrow().id, kind = job.kind(), "Simulated job completed");
    }
}

fn simulated_output(job: &ProcessingJob, id: &JobId) -> JobOutput {
    match job {
        ProcessingJob::Export { duration_secs, .. } => JobOutput::Video(VideoResult {
            video_base64: String::new(),
            filename: Some(format!("export-{}.mp4", id)),
            duration: *duration_secs,
        }),
        ProcessingJob::ApplyFilter { track_id, .. } | ProcessingJob::Trim { track_id, .. } => {
            JobOutput::Track {
                track_id: track_id.clone(),
            }
        }
    }
}

#[async_trait]
impl MediaProcessingBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn process(&self, job: ProcessingJob) -> EditorResult<JobHandle> {
        job.validate()?;

        let handle = JobHandle::pending();
        let (tx, _rx) = watch::channel(handle.clone());
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            jobs.insert(handle.id.clone(), tx.clone());
        }

        info!(job_id = %handle.id, kind = job.kind(), backend = self.name(), "Starting job");
        let span = info_span!("simulated_job", job_id = %handle.id);
        tokio::spawn(Self::run(tx, job, self.step_delay, self.step_percent).instrument(span));

        Ok(handle)
    }

    async fn status(&self, id: &JobId) -> EditorResult<JobHandle> {
        let jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.get(id)
            .map(|tx| tx.borrow().clone())
            .ok_or_else(|| EditorError::UnknownJob(id.clone()))
    }

    async fn forget(&self, id: &JobId) -> EditorResult<JobHandle> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        let handle = jobs
            .get(id)
            .map(|tx| tx.borrow().clone())
            .ok_or_else(|| EditorError::UnknownJob(id.clone()))?;
        if !handle.state.is_terminal() {
            return Err(EditorError::JobInProgress(id.clone()));
        }
        jobs.remove(id);
        Ok(handle)
    }
}

// =============================================================================
// API backend
// =============================================================================

/// Sends export jobs to the video assembly endpoint. Runs synchronously: the
/// returned handle is already terminal.
#[derive(Debug, Clone)]
pub struct ApiBackend {
    video: VideoService,
    jobs: Arc<Mutex<HashMap<JobId, JobHandle>>>,
}

impl ApiBackend {
    pub fn new(video: VideoService) -> Self {
        Self {
            video,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl MediaProcessingBackend for ApiBackend {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn process(&self, job: ProcessingJob) -> EditorResult<JobHandle> {
        job.validate()?;

        let request = match job {
            ProcessingJob::Export {
                images,
                audio_base64,
                duration_secs,
            } => VideoGenerateRequest {
                images,
                audio_base64,
                duration: duration_secs,
            },
            other => {
                return Err(EditorError::UnsupportedJob {
                    backend: self.name(),
                    job: other.kind().to_string(),
                })
            }
        };
        let mut handle = JobHandle::pending();
        info!(job_id = %handle.id, backend = self.name(), images = request.images.len(), "Starting export");

        let video = self.video.generate(&request).await?;

        handle.state = JobState::Completed;
        handle.progress_percent = 100;
        handle.output = Some(JobOutput::Video(video));

        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.insert(handle.id.clone(), handle.clone());
        Ok(handle)
    }

    async fn status(&self, id: &JobId) -> EditorResult<JobHandle> {
        let jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.get(id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownJob(id.clone()))
    }

    async fn forget(&self, id: &JobId) -> EditorResult<JobHandle> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.remove(id)
            .ok_or_else(|| EditorError::UnknownJob(id.clone()))
    }
}
