pub mod fields;
pub mod jobs;
pub mod jobs_meta;
pub mod statuses;
