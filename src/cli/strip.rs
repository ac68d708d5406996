//! # strip-metadata 子命令 CLI 定义
//!
//! 原地去除视频元数据（顺序执行）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/strip.rs`

use clap::Args;
use std::path::PathBuf;

/// strip-metadata 子命令参数
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Directory whose videos are rewritten in place
    #[arg(short, long)]
    pub input: PathBuf,

    /// Comma-separated list of file extensions to process
    #[arg(long, default_value = "mp4,avi,mkv,mov,wmv,flv,webm")]
    pub ext: String,

    /// Write per-file results to a CSV file
    #[arg(long)]
    pub report: Option<PathBuf>,
}
