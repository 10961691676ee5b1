use std::path::PathBuf;

use tabnorm_cli::pipeline::RunStats;

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub stats: RunStats,
}
