//! # crop 命令实现
//!
//! 并行裁剪视频；每个作业执行前用 ffprobe 读取实际尺寸并收缩裁剪区域
//!
//! ## 依赖关系
//! - 使用 `cli/crop.rs` 定义的参数
//! - 使用 `commands/batch.rs` 执行批次

use super::batch;
use crate::cli::crop::CropArgs;
use crate::cli::GlobalArgs;
use crate::error::{MediaBatchError, Result};
use crate::ffmpeg::FfmpegTool;
use crate::models::JobKind;
use crate::utils::output;

/// 执行 crop 命令
pub fn execute(args: CropArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Crop Videos");

    let kind = crop_kind(&args)?;
    output::print_info(&format!("Requested region: {}", kind));
    let tool = FfmpegTool::new(&global.ffmpeg, &global.ffprobe);

    batch::execute(&args.batch, "cropped_videos", kind, tool)
}

fn crop_kind(args: &CropArgs) -> Result<JobKind> {
    if args.width == 0 || args.height == 0 {
        return Err(MediaBatchError::InvalidArgument(format!(
            "crop dimensions must be positive, got {}x{}",
            args.width, args.height
        )));
    }

    Ok(JobKind::Crop {
        width: args.width,
        height: args.height,
        x: args.x,
        y: args.y,
        codec: args.codec.clone(),
    })
}
