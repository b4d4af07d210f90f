use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const AGGREGATE_FILE: &str = "pizza.txt";

/// Run settings shared by the fetcher and the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub aggregate_file: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// How many fetches may be in flight at once. 1 keeps the run strictly
    /// sequential.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from("."),
            aggregate_file: AGGREGATE_FILE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            concurrency: 1,
        }
    }
}

impl Config {
    pub fn aggregate_path(&self) -> PathBuf {
        self.output_dir.join(&self.aggregate_file)
    }
}
