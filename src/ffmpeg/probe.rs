//! # ffprobe 尺寸探测
//!
//! 裁剪前读取视频实际宽高，并把裁剪区域收缩到画面之内。
//!
//! ## 依赖关系
//! - 被 `ffmpeg/mod.rs` 使用
//! - 使用 `regex` 解析 ffprobe 输出

use crate::error::{MediaBatchError, Result};

use regex::Regex;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// 视频宽高
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// 裁剪区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// 调用 ffprobe 读取第一条视频流的宽高
pub fn probe_dimensions(ffprobe: &str, input: &Path) -> Result<Dimensions> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=p=0",
        ])
        .arg(input)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MediaBatchError::ToolNotFound {
                command: ffprobe.to_string(),
            },
            _ => MediaBatchError::ProbeFailed {
                path: input.display().to_string(),
                reason: e.to_string(),
            },
        })?;

    if !output.status.success() {
        return Err(MediaBatchError::ProbeFailed {
            path: input.display().to_string(),
            reason: format!(
                "{} exited with {}: {}",
                ffprobe,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_dimensions(&stdout).ok_or_else(|| MediaBatchError::ProbeFailed {
        path: input.display().to_string(),
        reason: format!("unexpected ffprobe output '{}'", stdout.trim()),
    })
}

/// 解析 `1920,1080` 形式的输出
pub fn parse_dimensions(text: &str) -> Option<Dimensions> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*[,x]\s*(\d+)").unwrap());

    let caps = pattern.captures(text)?;
    let width = caps[1].parse().ok()?;
    let height = caps[2].parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Dimensions { width, height })
}

/// 把请求的裁剪区域收缩到画面之内；偏移超出画面时返回错误原因
pub fn clamp_crop(requested: CropRect, actual: Dimensions) -> std::result::Result<CropRect, String> {
    if requested.x >= actual.width || requested.y >= actual.height {
        return Err(format!(
            "crop offset {}x{} lies outside the {}x{} frame",
            requested.x, requested.y, actual.width, actual.height
        ));
    }

    let mut rect = requested;
    if rect.width.saturating_add(rect.x) > actual.width
        || rect.height.saturating_add(rect.y) > actual.height
    {
        rect.width = rect.width.min(actual.width - rect.x);
        rect.height = rect.height.min(actual.height - rect.y);
        log::warn!(
            "crop {}x{}+{}+{} does not fit {}x{}, adjusted to {}x{}",
            requested.width,
            requested.height,
            requested.x,
            requested.y,
            actual.width,
            actual.height,
            rect.width,
            rect.height
        );
    }
    Ok(rect)
}
