pub mod seen_jobs;

pub use seen_jobs::SeenJobStore;
