use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeHandle;

/// One backend-ranked job record. Field names follow the backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuggestion {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Body of `GET /api/jobs/suggest`. A response without `jobs` means no matches.
#[derive(Debug, Deserialize)]
pub struct SuggestJobsResponse {
    #[serde(default)]
    pub jobs: Vec<JobSuggestion>,
}

/// Body of `POST /api/ats-score`.
#[derive(Debug, Serialize)]
pub struct AtsScoreRequest<'a> {
    pub resume_id: &'a ResumeHandle,
    pub job_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    pub score: f64, // 0 – 100, as reported by the backend
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

impl AtsScoreResult {
    /// Percentage as shown to the user: whole numbers without a fraction,
    /// anything else rounded to one decimal.
    pub fn display_score(&self) -> String {
        if self.score.fract() == 0.0 {
            format!("{:.0}", self.score)
        } else {
            format!("{:.1}", self.score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_suggestion_reads_backend_id_field() {
        let job: JobSuggestion = serde_json::from_value(json!({
            "_id": "j1",
            "title": "Backend Engineer",
            "company": "Acme",
            "skills": ["Java", "Kafka"]
        }))
        .unwrap();
        assert_eq!(job.id, "j1");
        assert_eq!(job.skills, vec!["Java", "Kafka"]);
        assert!(job.link.is_none());
    }

    #[test]
    fn test_job_suggestion_tolerates_missing_optional_fields() {
        let job: JobSuggestion = serde_json::from_value(json!({ "_id": "j9" })).unwrap();
        assert_eq!(job.title, "");
        assert!(job.skills.is_empty());
    }

    #[test]
    fn test_job_suggestion_requires_id() {
        let result = serde_json::from_value::<JobSuggestion>(json!({ "title": "No id" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_jobs_field_means_empty_list() {
        let response: SuggestJobsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.jobs.is_empty());
    }

    #[test]
    fn test_ats_request_wire_shape() {
        let handle = ResumeHandle::new("r1");
        let body = serde_json::to_value(AtsScoreRequest {
            resume_id: &handle,
            job_id: "j1",
        })
        .unwrap();
        assert_eq!(body, json!({ "resume_id": "r1", "job_id": "j1" }));
    }

    #[test]
    fn test_display_score_formats() {
        let whole = AtsScoreResult {
            score: 72.0,
            missing_keywords: vec![],
        };
        let fractional = AtsScoreResult {
            score: 64.37,
            missing_keywords: vec![],
        };
        assert_eq!(whole.display_score(), "72");
        assert_eq!(fractional.display_score(), "64.4");
    }

    #[test]
    fn test_display_score_does_not_saturate_large_values() {
        let huge = AtsScoreResult {
            score: 1e20,
            missing_keywords: vec![],
        };
        assert_eq!(huge.display_score(), "100000000000000000000");
    }
}
