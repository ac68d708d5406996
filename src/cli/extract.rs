//! # extract-audio 子命令 CLI 定义
//!
//! 并行提取视频音轨为 mp3
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use super::batch::BatchArgs;
use clap::Args;

/// extract-audio 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Audio quality for ffmpeg -q:a (0 = best, 9 = worst)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub quality: u8,

    /// Hardware acceleration backend (e.g. 'cuda')
    #[arg(long)]
    pub hwaccel: Option<String>,
}
