//! # mediabatch - 并行批量媒体处理
//!
//! 对一个目录中的所有视频并行执行同一种 ffmpeg 操作，
//! 前台实时显示进度，结束后汇总每个文件的结果。
//!
//! ## 子命令
//! - `extract-audio`  - 提取音轨为 mp3
//! - `resize`         - 缩放到固定尺寸
//! - `crop`           - 裁剪（按实际尺寸收缩）
//! - `strip-metadata` - 原地去除元数据（顺序执行）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (枚举、调度、进度、汇总)
//!   │     ├── ffmpeg/    (外部工具调用)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (日志、输出、进度条)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod ffmpeg;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.global.verbose);

    if let Err(e) = commands::run(cli) {
        log::error!("{:?}", e);
        utils::output::print_error(&format!("{}", e));
        if e.is_input_error() {
            utils::output::print_info("Nothing was processed. Run with --help for usage.");
        }
        std::process::exit(1);
    }
}
