//! Demo widget, the interactive part of the landing page.
//!
//! Holds one visitor's resume text, the backend-issued resume handle, the
//! suggested jobs, the chosen job, and the latest ATS score. All network
//! access goes through the injected `JobBackend`.

pub mod session;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend_client::{BackendError, JobBackend};
use crate::models::{AtsScoreResult, JobSuggestion, ResumeHandle};

pub use session::SessionStore;

/// Text pre-filled in the resume box for first-time visitors.
pub const DEFAULT_RESUME_CONTENT: &str = "Experienced React developer with Python and FastAPI, Docker, AWS. Built CI/CD pipelines, work with MongoDB and SQL. Strong communication and Agile.";

/// The backend call a workflow was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Upload,
    Suggest,
    Score,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::Upload => "resume upload",
            WorkflowStep::Suggest => "job suggestions",
            WorkflowStep::Score => "ATS score check",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{step} failed: {source}")]
pub struct WidgetError {
    pub step: WorkflowStep,
    #[source]
    pub source: BackendError,
}

impl WidgetError {
    fn new(step: WorkflowStep, source: BackendError) -> Self {
        Self { step, source }
    }

    /// Short message shown inline under the widget controls.
    pub fn user_message(&self) -> String {
        let action = match self.step {
            WorkflowStep::Upload => "upload your resume",
            WorkflowStep::Suggest => "load job suggestions",
            WorkflowStep::Score => "check your ATS score",
        };
        match &self.source {
            BackendError::Network(_) => {
                format!("Could not reach the job service to {action}. Please try again.")
            }
            BackendError::Server { status, .. } => {
                format!("The job service could not {action} (status {status}).")
            }
            BackendError::MalformedResponse(_) => {
                format!("The job service sent an unexpected reply while trying to {action}.")
            }
        }
    }
}

/// Whether an operation did its work or returned early on a missing precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Skipped,
}

/// Read-only view of the widget, shared by the HTML renderer and the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub content: String,
    pub resume_id: Option<ResumeHandle>,
    pub jobs: Vec<JobSuggestion>,
    pub selected_job_id: Option<String>,
    pub score: Option<AtsScoreResult>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct DemoWidget {
    backend: Arc<dyn JobBackend>,
    content: String,
    resume_id: Option<ResumeHandle>,
    jobs: Vec<JobSuggestion>,
    selected_job_id: Option<String>,
    score: Option<AtsScoreResult>,
    loading: bool,
    error: Option<WidgetError>,
}

impl DemoWidget {
    pub fn new(backend: Arc<dyn JobBackend>) -> Self {
        Self::with_content(backend, DEFAULT_RESUME_CONTENT)
    }

    pub fn with_content(backend: Arc<dyn JobBackend>, content: impl Into<String>) -> Self {
        Self {
            backend,
            content: content.into(),
            resume_id: None,
            jobs: Vec::new(),
            selected_job_id: None,
            score: None,
            loading: false,
            error: None,
        }
    }

    pub fn resume_id(&self) -> Option<&ResumeHandle> {
        self.resume_id.as_ref()
    }

    pub fn jobs(&self) -> &[JobSuggestion] {
        &self.jobs
    }

    pub fn selected_job_id(&self) -> Option<&str> {
        self.selected_job_id.as_deref()
    }

    pub fn score(&self) -> Option<&AtsScoreResult> {
        self.score.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&WidgetError> {
        self.error.as_ref()
    }

    /// Replaces the resume text verbatim.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Uploads the current content, then fetches suggestions for the returned handle.
    ///
    /// Both steps succeed or nothing is stored: on success the handle, the job
    /// list, and the selection (first job, if any) are replaced together and the
    /// previous score is dropped.
    pub async fn submit_resume(&mut self) -> Result<Outcome, WidgetError> {
        self.begin();
        let result = self.run_submit().await;
        self.finish(result.as_ref().err());

        let (resume_id, jobs) = result?;
        info!(
            "Resume {} accepted, {} job suggestion(s) received",
            resume_id,
            jobs.len()
        );

        self.selected_job_id = jobs.first().map(|job| job.id.clone());
        self.resume_id = Some(resume_id);
        self.jobs = jobs;
        self.score = None;
        Ok(Outcome::Completed)
    }

    async fn run_submit(&self) -> Result<(ResumeHandle, Vec<JobSuggestion>), WidgetError> {
        let resume_id = self
            .backend
            .upload_resume(&self.content)
            .await
            .map_err(|e| WidgetError::new(WorkflowStep::Upload, e))?;

        let jobs = self
            .backend
            .suggest_jobs(&resume_id)
            .await
            .map_err(|e| WidgetError::new(WorkflowStep::Suggest, e))?;

        Ok((resume_id, jobs))
    }

    /// Scores the current resume against the selected job.
    /// Skipped without a request when either one is missing.
    pub async fn check_ats_score(&mut self) -> Result<Outcome, WidgetError> {
        let (Some(resume_id), Some(job_id)) =
            (self.resume_id.clone(), self.selected_job_id.clone())
        else {
            return Ok(Outcome::Skipped);
        };

        self.begin();
        let result = self
            .backend
            .ats_score(&resume_id, &job_id)
            .await
            .map_err(|e| WidgetError::new(WorkflowStep::Score, e));
        self.finish(result.as_ref().err());

        let score = result?;
        info!("ATS score for resume {} against job {}: {}", resume_id, job_id, score.score);
        self.score = Some(score);
        Ok(Outcome::Completed)
    }

    /// Marks `job_id` as the selected job. Identifiers not in the current list are ignored.
    pub fn select_job(&mut self, job_id: &str) -> bool {
        if !self.jobs.iter().any(|job| job.id == job_id) {
            warn!("Ignoring selection of unknown job {}", job_id);
            return false;
        }
        if self.selected_job_id.as_deref() != Some(job_id) {
            self.selected_job_id = Some(job_id.to_string());
        }
        true
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            content: self.content.clone(),
            resume_id: self.resume_id().cloned(),
            jobs: self.jobs().to_vec(),
            selected_job_id: self.selected_job_id().map(str::to_string),
            score: self.score().cloned(),
            loading: self.is_loading(),
            error: self.error().map(WidgetError::user_message),
        }
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self, error: Option<&WidgetError>) {
        self.loading = false;
        if let Some(e) = error {
            warn!("Demo workflow failed: {}", e);
            self.error = Some(e.clone());
        }
    }
}
