//! # strip-metadata 命令实现
//!
//! 原地去除视频元数据。每个文件先写入同目录下的 `temp_<name>`，
//! 成功后原子替换原文件。整个目录严格顺序处理。
//!
//! ## 依赖关系
//! - 使用 `cli/strip.rs` 定义的参数
//! - 使用 `batch/collector.rs` 枚举文件, `batch/aggregator.rs` 汇总
//! - 使用 `ffmpeg/` 执行单个作业

use super::batch::print_report;
use crate::batch::{export, JobEnumerator, JobExecutor, ResultAggregator};
use crate::cli::strip::StripArgs;
use crate::cli::GlobalArgs;
use crate::error::{MediaBatchError, Result};
use crate::ffmpeg::FfmpegTool;
use crate::models::{BatchReport, Job, JobKind, JobResult, JobStatus};
use crate::utils::{output, progress};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// 执行 strip-metadata 命令
pub fn execute(args: StripArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Strip Metadata");

    let jobs = plan_jobs(&args.input, &args.ext)?;
    output::print_info(&format!(
        "Found {} files in {}",
        jobs.len(),
        args.input.display()
    ));

    let tool = FfmpegTool::new(&global.ffmpeg, &global.ffprobe);
    let pb = progress::create_progress_bar(jobs.len() as u64, "Stripping");
    let report = strip_in_place(&jobs, &tool, |result| {
        pb.inc(1);
        pb.set_message(result.status_text());
    });
    pb.finish_and_clear();
    let report = report?;

    for result in &report.results {
        if let JobStatus::Failed(reason) = &result.status {
            output::print_failure(&result.input.display().to_string(), reason);
        }
    }
    print_report(&report);

    if let Some(path) = &args.report {
        export::to_csv(&report, path)?;
        output::print_success(&format!("Report written to '{}'", path.display()));
    }

    Ok(())
}

/// 临时文件名前缀
const TEMP_PREFIX: &str = "temp_";

/// 枚举文件并为每个文件安排临时输出路径
///
/// 带临时前缀的文件不作为输入；任何临时路径已被占用时拒绝整个批次。
pub fn plan_jobs(input: &Path, extensions: &str) -> Result<Vec<Job>> {
    JobEnumerator::new(input.to_path_buf())
        .with_extensions(extensions)
        .skipping_prefix(TEMP_PREFIX)
        .enumerate(|id, path| {
            let temp = temp_path(&path)?;
            ensure_vacant(&temp)?;
            Ok(Job::new(id, path, temp, JobKind::StripMetadata))
        })
}

/// `dir/name` -> `dir/temp_name`
pub fn temp_path(input: &Path) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        MediaBatchError::InvalidArgument(format!("{} has no file name", input.display()))
    })?;
    let mut temp_name = std::ffi::OsString::from(TEMP_PREFIX);
    temp_name.push(name);
    Ok(input.with_file_name(temp_name))
}

/// 临时路径上不能有任何已存在的条目（包括悬空符号链接）
fn ensure_vacant(temp: &Path) -> Result<()> {
    if fs::symlink_metadata(temp).is_ok() {
        return Err(MediaBatchError::InvalidArgument(format!(
            "{} already exists; move it aside before stripping metadata",
            temp.display()
        )));
    }
    Ok(())
}

/// 顺序处理所有作业
///
/// 工具失败只记为该文件失败，原文件保持不变；
/// 原文件在处理前消失或替换失败则中止整个批次。
pub fn strip_in_place<E, F>(jobs: &[Job], executor: &E, mut on_result: F) -> Result<BatchReport>
where
    E: JobExecutor + ?Sized,
    F: FnMut(&JobResult),
{
    let mut results = Vec::with_capacity(jobs.len());

    for job in jobs {
        if !job.input.is_file() {
            return Err(MediaBatchError::FileReadError {
                path: job.input.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "file disappeared before processing"),
            });
        }
        ensure_vacant(&job.output)?;

        let started = Instant::now();
        let status = match executor.execute(job) {
            Ok(()) => {
                if let Err(e) = fs::rename(&job.output, &job.input) {
                    remove_temp(&job.output);
                    return Err(MediaBatchError::ReplaceFailed {
                        temp: job.output.display().to_string(),
                        target: job.input.display().to_string(),
                        source: e,
                    });
                }
                log::debug!("job {}: replaced {}", job.id, job.input.display());
                JobStatus::Succeeded
            }
            Err(e) => {
                log::warn!("job {} failed: {}", job.id, e);
                remove_temp(&job.output);
                JobStatus::Failed(e.to_string())
            }
        };

        let result = JobResult {
            job_id: job.id,
            input: job.input.clone(),
            status,
            duration: started.elapsed(),
        };
        on_result(&result);
        results.push(result);
    }

    Ok(ResultAggregator::collect(results))
}

fn remove_temp(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 把输入内容加上前缀写到输出
    struct Rewriter {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    impl Rewriter {
        fn new(fail_on: Option<usize>) -> Self {
            Rewriter {
                calls: AtomicUsize::new(0),
                fail_on,
            }
        }
    }

    impl JobExecutor for Rewriter {
        fn execute(&self, job: &Job) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let data = fs::read(&job.input).unwrap();
            fs::write(&job.output, [b"clean:".as_slice(), data.as_slice()].concat()).unwrap();
            if self.fail_on == Some(job.id) {
                return Err(MediaBatchError::ToolFailed {
                    command: "ffmpeg".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "Invalid data found".to_string(),
                });
            }
            Ok(())
        }
    }

    fn setup(names: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), name.as_bytes()).unwrap();
        }
        tmp
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with("temp_"))
            .collect()
    }

    #[test]
    fn test_temp_path_in_same_directory() {
        let temp = temp_path(Path::new("/videos/clip one.mp4")).unwrap();
        assert_eq!(temp, PathBuf::from("/videos/temp_clip one.mp4"));
    }

    #[test]
    fn test_replaces_files_in_place() {
        let tmp = setup(&["a.mp4", "b.mkv"]);
        let jobs = plan_jobs(tmp.path(), "mp4,mkv").unwrap();
        let rewriter = Rewriter::new(None);
        let mut seen = Vec::new();

        let report = strip_in_place(&jobs, &rewriter, |r| seen.push(r.status_text())).unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(seen, vec!["Processed: a.mp4", "Processed: b.mkv"]);
        assert_eq!(fs::read(tmp.path().join("a.mp4")).unwrap(), b"clean:a.mp4");
        assert!(leftovers(tmp.path()).is_empty());
    }

    #[test]
    fn test_tool_failure_keeps_original_and_removes_temp() {
        let tmp = setup(&["a.mp4", "b.mp4", "c.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        let rewriter = Rewriter::new(Some(2));

        let report = strip_in_place(&jobs, &rewriter, |_| {}).unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].0, 2);
        assert_eq!(fs::read(tmp.path().join("b.mp4")).unwrap(), b"b.mp4");
        assert_eq!(fs::read(tmp.path().join("c.mp4")).unwrap(), b"clean:c.mp4");
        assert!(leftovers(tmp.path()).is_empty());
    }

    #[test]
    fn test_vanished_file_aborts_batch() {
        let tmp = setup(&["a.mp4", "b.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        fs::remove_file(tmp.path().join("a.mp4")).unwrap();
        let rewriter = Rewriter::new(None);

        let err = strip_in_place(&jobs, &rewriter, |_| {}).unwrap_err();
        assert!(matches!(err, MediaBatchError::FileReadError { .. }));
        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_existing_temp_file_is_never_touched() {
        let tmp = setup(&["a.mp4", "b.mp4"]);
        fs::write(tmp.path().join("temp_a.mp4"), b"USER DATA").unwrap();

        let err = plan_jobs(tmp.path(), "mp4").unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("temp_a.mp4"));
        assert_eq!(fs::read(tmp.path().join("temp_a.mp4")).unwrap(), b"USER DATA");
        assert_eq!(fs::read(tmp.path().join("a.mp4")).unwrap(), b"a.mp4");
    }

    #[test]
    fn test_temp_prefixed_files_are_not_inputs() {
        let tmp = setup(&["b.mp4", "temp_old.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].input.ends_with("b.mp4"));
        assert!(jobs[0].output.ends_with("temp_b.mp4"));
    }

    #[test]
    fn test_temp_created_after_planning_aborts_before_tool_runs() {
        let tmp = setup(&["a.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        fs::write(tmp.path().join("temp_a.mp4"), b"USER DATA").unwrap();
        let rewriter = Rewriter::new(None);

        let err = strip_in_place(&jobs, &rewriter, |_| {}).unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read(tmp.path().join("temp_a.mp4")).unwrap(), b"USER DATA");
    }

    #[cfg(unix)]
    #[test]
    fn test_with_stand_in_ffmpeg() {
        let tools = tempfile::tempdir().unwrap();
        let ffmpeg = crate::ffmpeg::test_support::fake_ffmpeg(tools.path());
        let tmp = setup(&["a.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        let tool = FfmpegTool::new(ffmpeg.display().to_string(), "ffprobe");

        let report = strip_in_place(&jobs, &tool, |_| {}).unwrap();
        assert_eq!(report.succeeded, 1);
        assert_eq!(fs::read_to_string(tmp.path().join("a.mp4")).unwrap().trim(), "converted");
        assert!(leftovers(tmp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_ffmpeg_leaves_original() {
        let tmp = setup(&["a.mp4"]);
        let jobs = plan_jobs(tmp.path(), "mp4").unwrap();
        let tool = FfmpegTool::new("false", "ffprobe");

        let report = strip_in_place(&jobs, &tool, |_| {}).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(fs::read(tmp.path().join("a.mp4")).unwrap(), b"a.mp4");
    }
}
