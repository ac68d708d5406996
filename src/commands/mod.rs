//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `ffmpeg/`, `models/`, `utils/`
//! - 子模块: batch, extract, resize, crop, strip

pub mod batch;
pub mod crop;
pub mod extract;
pub mod resize;
pub mod strip;

use crate::cli::{Cli, Commands};
use crate::error::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::ExtractAudio(args) => extract::execute(args, &global),
        Commands::Resize(args) => resize::execute(args, &global),
        Commands::Crop(args) => crop::execute(args, &global),
        Commands::StripMetadata(args) => strip::execute(args, &global),
    }
}
