//! # crop 子命令 CLI 定义
//!
//! 并行裁剪视频，裁剪区域按实际尺寸收缩
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/crop.rs`

use super::batch::BatchArgs;
use clap::Args;

/// crop 子命令参数
#[derive(Args, Debug)]
pub struct CropArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Crop width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Crop height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Horizontal offset of the crop region
    #[arg(long, default_value_t = 0)]
    pub x: u32,

    /// Vertical offset of the crop region
    #[arg(long, default_value_t = 0)]
    pub y: u32,

    /// Video codec passed to ffmpeg -c:v (e.g. 'h264_nvenc')
    #[arg(long, default_value = "libx264")]
    pub codec: String,
}
