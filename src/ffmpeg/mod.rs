//! # ffmpeg 外部工具
//!
//! 每个作业同步调用一次 ffmpeg，根据退出码和输出文件判断成败。
//!
//! ## 功能
//! - 每种作业类型使用固定参数模板
//! - 标准输出丢弃，标准错误捕获后只用于失败原因
//! - 退出码为 0 时还要求输出文件存在且非空
//! - 裁剪作业先用 ffprobe 探测尺寸并收缩裁剪区域
//!
//! ## 依赖关系
//! - 被 `commands/` 构造，作为 `JobExecutor` 交给调度器
//! - 子模块: args, probe

pub mod args;
pub mod probe;

use crate::batch::JobExecutor;
use crate::error::{MediaBatchError, Result};
use crate::models::{Job, JobKind};

use probe::CropRect;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// ffmpeg 执行器
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    /// ffmpeg 可执行文件
    ffmpeg: String,
    /// ffprobe 可执行文件
    ffprobe: String,
}

impl FfmpegTool {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        FfmpegTool {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// 按实际尺寸调整作业参数（仅裁剪作业）
    fn resolve_kind(&self, job: &Job) -> Result<JobKind> {
        match &job.kind {
            JobKind::Crop {
                width,
                height,
                x,
                y,
                codec,
            } => {
                let actual = probe::probe_dimensions(&self.ffprobe, &job.input)?;
                let requested = CropRect {
                    width: *width,
                    height: *height,
                    x: *x,
                    y: *y,
                };
                let rect = probe::clamp_crop(requested, actual).map_err(|reason| {
                    MediaBatchError::ProbeFailed {
                        path: job.input.display().to_string(),
                        reason,
                    }
                })?;
                Ok(JobKind::Crop {
                    width: rect.width,
                    height: rect.height,
                    x: rect.x,
                    y: rect.y,
                    codec: codec.clone(),
                })
            }
            other => Ok(other.clone()),
        }
    }
}

impl JobExecutor for FfmpegTool {
    fn execute(&self, job: &Job) -> Result<()> {
        let kind = if job.kind.needs_probe() {
            self.resolve_kind(job)?
        } else {
            job.kind.clone()
        };

        let args = args::ffmpeg_args(&kind, &job.input, &job.output);
        log::debug!("job {}: {}", job.id, args::render_command(&self.ffmpeg, &args));

        let output = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => MediaBatchError::ToolNotFound {
                    command: self.ffmpeg.clone(),
                },
                _ => MediaBatchError::ToolFailed {
                    command: self.ffmpeg.clone(),
                    status: "spawn error".to_string(),
                    stderr: e.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(MediaBatchError::ToolFailed {
                command: self.ffmpeg.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        verify_output(&job.output)
    }
}

/// 输出文件必须存在且非空
fn verify_output(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        _ => Err(MediaBatchError::OutputMissing {
            path: path.display().to_string(),
        }),
    }
}

#[cfg(all(test, unix))]
pub(crate) mod test_support {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// 生成一个把 "converted" 写入最后一个参数的假 ffmpeg
    pub fn fake_ffmpeg(dir: &Path) -> PathBuf {
        let script = dir.join("fake-ffmpeg");
        fs::write(
            &script,
            "#!/bin/sh\nfor last; do :; done\nprintf converted > \"$last\"\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn resize_job(dir: &Path) -> Job {
        let input = dir.join("clip.mp4");
        fs::write(&input, b"video").unwrap();
        Job::new(
            1,
            input,
            dir.join("out.mp4"),
            JobKind::Resize {
                width: 640,
                height: 480,
                codec: "libx264".into(),
            },
        )
    }

    #[test]
    fn test_non_zero_exit_preserves_detail() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = FfmpegTool::new("false", "ffprobe");
        let err = tool.execute(&resize_job(tmp.path())).unwrap_err();
        match err {
            MediaBatchError::ToolFailed { status, .. } => assert!(status.contains('1')),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_tool() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = FfmpegTool::new("mediabatch-no-such-ffmpeg", "ffprobe");
        let err = tool.execute(&resize_job(tmp.path())).unwrap_err();
        assert!(matches!(err, MediaBatchError::ToolNotFound { .. }));
    }

    #[test]
    fn test_success_without_artifact_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = FfmpegTool::new("true", "ffprobe");
        let err = tool.execute(&resize_job(tmp.path())).unwrap_err();
        assert!(matches!(err, MediaBatchError::OutputMissing { .. }));
    }

    #[test]
    fn test_success_with_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let script = test_support::fake_ffmpeg(tmp.path());
        let tool = FfmpegTool::new(script.display().to_string(), "ffprobe");
        let job = resize_job(tmp.path());
        tool.execute(&job).unwrap();
        assert_eq!(fs::read_to_string(&job.output).unwrap(), "converted");
    }

    #[test]
    fn test_crop_fails_when_probe_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let script = test_support::fake_ffmpeg(tmp.path());
        let tool = FfmpegTool::new(script.display().to_string(), "false");
        let job = Job::new(
            1,
            PathBuf::from("clip.mp4"),
            tmp.path().join("out.mp4"),
            JobKind::Crop {
                width: 10,
                height: 10,
                x: 0,
                y: 0,
                codec: "libx264".into(),
            },
        );
        let err = tool.execute(&job).unwrap_err();
        assert!(matches!(err, MediaBatchError::ProbeFailed { .. }));
        assert!(!job.output.exists());
    }
}
