//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract-audio`: 并行提取音频
//! - `resize`: 并行缩放视频
//! - `crop`: 并行裁剪视频
//! - `strip-metadata`: 原地顺序去除元数据
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: batch, extract, resize, crop, strip

pub mod batch;
pub mod crop;
pub mod extract;
pub mod resize;
pub mod strip;

use clap::{Args, Parser, Subcommand};

/// mediabatch - 并行批量媒体处理
#[derive(Parser)]
#[command(name = "mediabatch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Parallel batch media processing driven by ffmpeg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 所有子命令共享的全局参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// ffmpeg executable
    #[arg(long, global = true, env = "MEDIABATCH_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// ffprobe executable (used by crop)
    #[arg(long, global = true, env = "MEDIABATCH_FFPROBE", default_value = "ffprobe")]
    pub ffprobe: String,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract the audio track of every video into an .mp3
    ExtractAudio(extract::ExtractArgs),

    /// Resize every video to a fixed frame size
    Resize(resize::ResizeArgs),

    /// Crop every video to a region (clamped to the real frame size)
    Crop(crop::CropArgs),

    /// Remove metadata from every video in place, one file at a time
    StripMetadata(strip::StripArgs),
}
