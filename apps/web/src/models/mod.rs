pub mod job;
pub mod resume;

pub use job::{AtsScoreRequest, AtsScoreResult, JobSuggestion, SuggestJobsResponse};
pub use resume::{ResumeHandle, UploadResumeRequest, UploadResumeResponse};
