//! # resize 命令实现
//!
//! 并行将视频缩放到固定尺寸，输出文件名与输入相同
//!
//! ## 依赖关系
//! - 使用 `cli/resize.rs` 定义的参数
//! - 使用 `commands/batch.rs` 执行批次

use super::batch;
use crate::cli::resize::ResizeArgs;
use crate::cli::GlobalArgs;
use crate::error::{MediaBatchError, Result};
use crate::ffmpeg::FfmpegTool;
use crate::models::JobKind;
use crate::utils::output;

/// 执行 resize 命令
pub fn execute(args: ResizeArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Resize Videos");

    let kind = resize_kind(&args)?;
    let tool = FfmpegTool::new(&global.ffmpeg, &global.ffprobe);

    batch::execute(&args.batch, "output", kind, tool)
}

fn resize_kind(args: &ResizeArgs) -> Result<JobKind> {
    if args.width == 0 || args.height == 0 {
        return Err(MediaBatchError::InvalidArgument(format!(
            "resize dimensions must be positive, got {}x{}",
            args.width, args.height
        )));
    }
    if args.codec.trim().is_empty() {
        return Err(MediaBatchError::InvalidArgument(
            "video codec must not be empty".to_string(),
        ));
    }

    Ok(JobKind::Resize {
        width: args.width,
        height: args.height,
        codec: args.codec.clone(),
    })
}
