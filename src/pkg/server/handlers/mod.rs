pub mod fields;
pub mod jobs;
pub mod probes;
pub mod statuses;
pub mod transfer;
