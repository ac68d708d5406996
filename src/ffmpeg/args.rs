//! # ffmpeg 参数模板
//!
//! 每种作业类型对应一个固定的参数模板，只替换路径和作业参数。
//!
//! ## 依赖关系
//! - 被 `ffmpeg/mod.rs` 使用
//! - 无外部模块依赖

use crate::models::JobKind;

use std::ffi::OsString;
use std::path::Path;

/// 根据作业类型生成 ffmpeg 参数
pub fn ffmpeg_args(kind: &JobKind, input: &Path, output: &Path) -> Vec<OsString> {
    let input = input.as_os_str().to_owned();
    let output = output.as_os_str().to_owned();

    match kind {
        JobKind::ExtractAudio { quality, hwaccel } => {
            let mut args = Vec::new();
            if let Some(accel) = hwaccel {
                args.extend([os("-hwaccel"), os(accel)]);
            }
            args.extend([os("-i"), input]);
            args.extend([os("-q:a"), os(&quality.to_string()), os("-map"), os("a")]);
            args.extend([output, os("-y")]);
            args
        }
        JobKind::Resize {
            width,
            height,
            codec,
        } => vec![
            os("-y"),
            os("-i"),
            input,
            os("-vf"),
            os(&format!("scale={}:{}", width, height)),
            os("-c:v"),
            os(codec),
            os("-c:a"),
            os("copy"),
            output,
        ],
        JobKind::Crop {
            width,
            height,
            x,
            y,
            codec,
        } => vec![
            os("-y"),
            os("-i"),
            input,
            os("-filter:v"),
            os(&format!("crop={}:{}:{}:{}", width, height, x, y)),
            os("-c:v"),
            os(codec),
            os("-c:a"),
            os("copy"),
            output,
        ],
        JobKind::StripMetadata => vec![
            os("-y"),
            os("-i"),
            input,
            os("-map"),
            os("0"),
            os("-map_metadata"),
            os("-1"),
            os("-c"),
            os("copy"),
            output,
        ],
    }
}

fn os(s: &str) -> OsString {
    OsString::from(s)
}

/// 用于日志的命令行
pub fn render_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        let arg = arg.to_string_lossy();
        if arg.contains(' ') {
            line.push_str(&format!("\"{}\"", arg));
        } else {
            line.push_str(&arg);
        }
    }
    line
}
