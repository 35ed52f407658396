//! The application-stage lookup as a closed enumeration.
//!
//! The `status` collection stays seeded in the store, but resolution in both
//! directions goes through this fixed table instead of re-scanning rows.

/// Stages a tracked application can be in. Ids match the seeded `status` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    SentRequest,
    InProgress,
    Interview,
    Rejected,
    Success,
}

pub const DEFAULT_STATUS: JobStatus = JobStatus::SentRequest;

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::SentRequest,
        JobStatus::InProgress,
        JobStatus::Interview,
        JobStatus::Rejected,
        JobStatus::Success,
    ];

    pub fn id(self) -> i64 {
        match self {
            JobStatus::SentRequest => 1,
            JobStatus::InProgress => 2,
            JobStatus::Interview => 3,
            JobStatus::Rejected => 4,
            JobStatus::Success => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::SentRequest => "Sent Request",
            JobStatus::InProgress => "In Progress",
            JobStatus::Interview => "Interview",
            JobStatus::Rejected => "Rejected",
            JobStatus::Success => "Success",
        }
    }

    pub fn from_id(id: i64) -> Option<JobStatus> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Case-insensitive label match, the way CSV imports carry statuses.
    pub fn from_label(label: &str) -> Option<JobStatus> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}

/// A dangling status reference renders as `Unknown` rather than erroring.
pub fn label_for(id: i64) -> &'static str {
    JobStatus::from_id(id).map(JobStatus::label).unwrap_or("Unknown")
}
