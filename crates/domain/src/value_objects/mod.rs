//! Value objects for the speech conversion domain

mod blob_key;
mod job_name;
mod job_status;

pub use blob_key::BlobKey;
pub use job_name::JobName;
pub use job_status::JobStatus;
