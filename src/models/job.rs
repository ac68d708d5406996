//! # 作业数据模型
//!
//! 一个作业 = 一个输入文件 + 处理参数。枚举完成后不可变。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 创建
//! - 被 `batch/runner.rs`, `ffmpeg/` 使用

use std::path::{Path, PathBuf};

/// 作业类型及其专用参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// 提取音频为 mp3
    ExtractAudio {
        /// ffmpeg `-q:a` 质量等级 (0 最好)
        quality: u8,
        /// 硬件加速后端，如 `cuda`
        hwaccel: Option<String>,
    },
    /// 缩放到固定尺寸
    Resize {
        width: u32,
        height: u32,
        codec: String,
    },
    /// 裁剪区域（执行前按实际尺寸收缩）
    Crop {
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        codec: String,
    },
    /// 去除全部元数据（流拷贝）
    StripMetadata,
}

impl JobKind {
    /// 输出文件名：提取音频改为 `.mp3`，其余保持原名
    pub fn output_name(&self, input: &Path) -> Option<String> {
        match self {
            JobKind::ExtractAudio { .. } => input
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|stem| format!("{}.mp3", stem)),
            _ => input
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string),
        }
    }

    /// 是否需要先探测输入尺寸
    pub fn needs_probe(&self) -> bool {
        matches!(self, JobKind::Crop { .. })
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::ExtractAudio { .. } => write!(f, "extract-audio"),
            JobKind::Resize { width, height, .. } => write!(f, "resize {}x{}", width, height),
            JobKind::Crop {
                width,
                height,
                x,
                y,
                ..
            } => write!(f, "crop {}x{}+{}+{}", width, height, x, y),
            JobKind::StripMetadata => write!(f, "strip-metadata"),
        }
    }
}

/// 单个作业
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// 作业编号（枚举顺序，从 1 开始）
    pub id: usize,
    /// 输入文件
    pub input: PathBuf,
    /// 输出文件
    pub output: PathBuf,
    /// 作业类型
    pub kind: JobKind,
}

impl Job {
    pub fn new(id: usize, input: PathBuf, output: PathBuf, kind: JobKind) -> Self {
        Job {
            id,
            input,
            output,
            kind,
        }
    }

    /// 用于状态文本的短文件名
    pub fn display_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// 作业状态机：Pending → Running → {Succeeded, Failed}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }

    /// 检查状态迁移是否合法（只允许单向前进）
    pub fn can_transition_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Pending, JobState::Running)
                | (JobState::Running, JobState::Succeeded)
                | (JobState::Running, JobState::Failed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name() {
        let audio = JobKind::ExtractAudio {
            quality: 0,
            hwaccel: None,
        };
        assert_eq!(
            audio.output_name(Path::new("/v/Day_1.MP4")),
            Some("Day_1.mp3".to_string())
        );
        assert_eq!(
            JobKind::StripMetadata.output_name(Path::new("/v/clip.mkv")),
            Some("clip.mkv".to_string())
        );
    }

    #[test]
    fn test_state_machine_is_one_way() {
        use JobState::*;
        assert!(Pending.can_transition_to(Running));
        assert!(Running.can_transition_to(Succeeded));
        assert!(Running.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Succeeded));
        assert!(!Running.can_transition_to(Pending));
        assert!(!Succeeded.can_transition_to(Running));
        assert!(!Failed.can_transition_to(Succeeded));
        assert!(Failed.is_terminal() && Succeeded.is_terminal());
        assert!(!Running.is_terminal());
    }

    #[test]
    fn test_kind_display() {
        let crop = JobKind::Crop {
            width: 1280,
            height: 720,
            x: 10,
            y: 20,
            codec: "libx264".into(),
        };
        assert_eq!(crop.to_string(), "crop 1280x720+10+20");
    }
}
