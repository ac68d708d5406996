//! # 批处理公共参数
//!
//! 被 `extract-audio`, `resize`, `crop` 以 `#[command(flatten)]` 引入。
//!
//! ## 依赖关系
//! - 被 `cli/` 各子命令使用
//! - 参数传递给 `commands/batch.rs`

use clap::Args;
use std::path::PathBuf;

/// 输入/并行/进度参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input directory containing videos (not searched recursively)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, env = "MEDIABATCH_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Comma-separated list of file extensions to process
    #[arg(long, default_value = "mp4,avi,mkv,mov,wmv,flv,webm")]
    pub ext: String,

    /// Start one worker per file and skip progress reporting
    #[arg(long, default_value_t = false)]
    pub one_per_job: bool,

    /// Progress polling interval in milliseconds (0 = default)
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Write per-job results to a CSV file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BatchArgs {
    /// 输出目录：未指定时位于输入目录下的 `default_name`
    pub fn output_dir(&self, default_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.join(default_name))
    }
}
