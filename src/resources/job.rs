//! Asynchronous job resource.
//!
//! Long-running operations such as customer merges return a job link; poll
//! `GET /jobs/{id}` until [`Job::is_complete`] reports `true`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

/// Kind descriptor for `/jobs`.
pub const JOB: ResourceKind = ResourceKind {
    name: "job",
    collection: "jobs",
    requires_identity: false,
    nested: &[],
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Job {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Job {
    /// Returns `true` once the server has stamped a completion time.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns `true` if the job reported an error.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.last_error.is_some()
    }
}

impl Resource for Job {
    type ListParams = PageParams;
    type SearchParams = PageParams;

    const KIND: &'static ResourceKind = &JOB;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_deserialization() {
        let job: Job = serde_json::from_value(json!({
            "type": "customer_merge",
            "status_message": "Completed",
            "progress": 100.0,
            "created_at": "2014-03-19T19:33:53Z",
            "completed_at": "2014-03-19T19:33:56Z",
            "_links": {"self": {"href": "/api/v2/jobs/abc123", "class": "job"}}
        }))
        .unwrap();

        assert_eq!(job.job_type.as_deref(), Some("customer_merge"));
        assert!(job.is_complete());
        assert!(!job.has_failed());
        assert_eq!(job.resource_id(), Some("abc123"));
    }

    #[test]
    fn test_pending_job() {
        let job: Job = serde_json::from_value(json!({"progress": 12.5})).unwrap();
        assert!(!job.is_complete());
        assert!((job.progress - 12.5).abs() < f64::EPSILON);
    }
}
