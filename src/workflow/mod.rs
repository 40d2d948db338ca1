pub mod capture_job;
pub mod job_flow;
pub mod sweep_planner;

pub use capture_job::{CaptureJob, SweepLayout};
pub use job_flow::{JobFlow, JobResult};
pub use sweep_planner::plan;
