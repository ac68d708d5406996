//! # extract-audio 命令实现
//!
//! 并行提取每个视频的音轨到 `<stem>.mp3`
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `commands/batch.rs` 执行批次

use super::batch;
use crate::cli::extract::ExtractArgs;
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::ffmpeg::FfmpegTool;
use crate::models::JobKind;
use crate::utils::output;

/// 执行 extract-audio 命令
pub fn execute(args: ExtractArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Extract Audio");

    let kind = JobKind::ExtractAudio {
        quality: args.quality,
        hwaccel: args.hwaccel.filter(|h| !h.trim().is_empty()),
    };
    let tool = FfmpegTool::new(&global.ffmpeg, &global.ffprobe);

    batch::execute(&args.batch, "audio", kind, tool)
}
