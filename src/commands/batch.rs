//! # 并行批处理公共流程
//!
//! extract-audio / resize / crop 共用的执行流程：
//! 枚举 → 创建输出目录 → 后台派发 → 前台轮询进度 → 汇总 → 报告。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/resize.rs`, `commands/crop.rs` 调用
//! - 使用 `batch/`, `ffmpeg/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{
    export, progress_channel, Dispatcher, JobEnumerator, JobExecutor, ProgressConsumer,
    ResultAggregator, SharedProgressState, DEFAULT_POLL_INTERVAL,
};
use crate::cli::batch::BatchArgs;
use crate::error::{MediaBatchError, Result};
use crate::models::{BatchReport, Job, JobKind};
use crate::utils::{output, progress};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};

/// 执行一个并行批次并打印报告
pub fn execute<E>(args: &BatchArgs, default_output: &str, kind: JobKind, executor: E) -> Result<()>
where
    E: JobExecutor + 'static,
{
    let output_dir = args.output_dir(default_output);
    let jobs = plan_jobs(args, &output_dir, &kind)?;

    fs::create_dir_all(&output_dir).map_err(|e| MediaBatchError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    output::print_info(&format!(
        "Found {} files in {}, output to {}",
        jobs.len(),
        args.input.display(),
        output_dir.display()
    ));

    let report = run_jobs(args, jobs, Arc::new(executor))?;
    print_report(&report);

    if let Some(path) = &args.report {
        export::to_csv(&report, path)?;
        output::print_success(&format!("Report written to '{}'", path.display()));
    }

    Ok(())
}

/// 枚举输入目录并生成作业；在派发前完成所有输入校验
pub fn plan_jobs(args: &BatchArgs, output_dir: &Path, kind: &JobKind) -> Result<Vec<Job>> {
    if !args.input.is_dir() {
        return Err(MediaBatchError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }
    if same_directory(&args.input, output_dir) {
        return Err(MediaBatchError::InvalidArgument(format!(
            "output directory {} is the input directory; use strip-metadata for in-place edits",
            output_dir.display()
        )));
    }

    let jobs = JobEnumerator::new(args.input.clone())
        .with_extensions(&args.ext)
        .enumerate(|id, input| {
            let name = kind.output_name(&input).ok_or_else(|| {
                MediaBatchError::InvalidArgument(format!(
                    "cannot derive an output name for {}",
                    input.display()
                ))
            })?;
            Ok(Job::new(id, input, output_dir.join(name), kind.clone()))
        })?;

    ensure_distinct_outputs(&jobs)?;
    Ok(jobs)
}

/// 每个作业必须独占自己的输出文件
fn ensure_distinct_outputs(jobs: &[Job]) -> Result<()> {
    let mut owners: HashMap<&Path, &Path> = HashMap::with_capacity(jobs.len());
    for job in jobs {
        if let Some(first) = owners.insert(job.output.as_path(), job.input.as_path()) {
            return Err(MediaBatchError::InvalidArgument(format!(
                "{} and {} would both write {}",
                first.display(),
                job.input.display(),
                job.output.display()
            )));
        }
    }
    Ok(())
}

/// 后台派发作业，前台轮询进度直到哨兵出现，然后汇总
pub fn run_jobs<E>(args: &BatchArgs, jobs: Vec<Job>, executor: Arc<E>) -> Result<BatchReport>
where
    E: JobExecutor + ?Sized + 'static,
{
    let state = Arc::new(SharedProgressState::new(jobs.len()));

    if args.one_per_job {
        let spinner = progress::create_spinner(&format!("Processing {} files", jobs.len()));
        let handle = Dispatcher::one_per_job().spawn(jobs, executor, state, None)?;
        let report = ResultAggregator::join(handle);
        spinner.finish_and_clear();
        return report;
    }

    let (publisher, receiver) = progress_channel();
    let handle =
        Dispatcher::new(args.jobs).spawn(jobs, executor, Arc::clone(&state), Some(publisher))?;

    let mut consumer = ProgressConsumer::new(receiver, state);
    let mut view = progress::view_for_terminal("Processing");
    let interval = match args.interval_ms {
        0 => DEFAULT_POLL_INTERVAL,
        ms => Duration::from_millis(ms),
    };
    consumer.run(view.as_mut(), interval);

    let last = consumer.snapshot();
    log::debug!(
        "progress stopped at {}/{} ({:.0}%), {} completion marker(s)",
        last.completed,
        last.total,
        last.percent,
        consumer.sentinels_seen()
    );

    ResultAggregator::join(handle)
}

/// 打印最终报告
pub fn print_report(report: &BatchReport) {
    #[derive(Tabled)]
    struct FailureRow {
        #[tabled(rename = "Job")]
        id: usize,
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Reason")]
        reason: String,
    }

    output::print_separator();
    output::print_done(&format!(
        "{} succeeded, {} failed ({} total)",
        report.succeeded,
        report.failed,
        report.total()
    ));

    if !report.is_partial_failure() {
        return;
    }

    let rows: Vec<FailureRow> = report
        .results
        .iter()
        .filter(|r| !r.status.is_success())
        .map(|r| FailureRow {
            id: r.job_id,
            file: r
                .input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            reason: report.failure_reason(r.job_id).unwrap_or_default().to_string(),
        })
        .collect();

    output::print_header(&format!("{} Failed Jobs", rows.len()));
    println!("{}", Table::new(&rows));
    output::print_warning("Batch finished with failures; see the table above.");
}

/// 判断两个路径是否指向同一目录（输出目录可能尚不存在）
fn same_directory(a: &Path, b: &Path) -> bool {
    let canonical = |p: &Path| -> PathBuf { fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf()) };
    canonical(a) == canonical(b)
}
