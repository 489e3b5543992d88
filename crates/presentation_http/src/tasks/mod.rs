//! Background tasks

pub mod job_cleanup;

pub use job_cleanup::spawn_job_cleanup_task;
