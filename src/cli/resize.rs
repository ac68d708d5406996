//! # resize 子命令 CLI 定义
//!
//! 并行缩放视频到固定尺寸
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/resize.rs`

use super::batch::BatchArgs;
use clap::Args;

/// resize 子命令参数
#[derive(Args, Debug)]
pub struct ResizeArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Target width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Target height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Video codec passed to ffmpeg -c:v
    #[arg(long, default_value = "libx264")]
    pub codec: String,
}
