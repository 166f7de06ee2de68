use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the backend issues for an accepted resume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeHandle(String);

impl ResumeHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResumeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/resume/upload`.
#[derive(Debug, Serialize)]
pub struct UploadResumeRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UploadResumeResponse {
    pub resume_id: ResumeHandle,
}
