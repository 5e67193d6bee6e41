//! 业务逻辑服务层

mod batch_submitter;
mod change_builder;
mod record_fetcher;
mod run_coordinator;

pub use batch_submitter::{BatchSubmitter, DEFAULT_BATCH_SIZE};
pub use change_builder::{build_repoint_changes, build_weight_changes};
pub use record_fetcher::RecordFetcher;
pub use run_coordinator::{DEFAULT_PAGE_SIZE, RunCoordinator, RunOptions};
