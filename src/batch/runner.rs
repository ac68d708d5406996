//! # 批量调度器
//!
//! 把作业分派到固定大小的 worker 池，每个作业恰好执行一次。
//!
//! ## 功能
//! - 基于 rayon 线程池，每个 worker 同步调用外部工具并等待其退出
//! - 单个作业的失败（包括 panic）在 worker 内部转换为 `JobResult`，不会中断批处理
//! - 作业完成时递增共享进度，并在持锁期间推送进度消息
//! - 所有 worker 结束后推送一次终止哨兵
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `batch/ledger.rs`, `batch/state.rs`, `batch/channel.rs`
//! - 使用 `rayon` 进行并行处理

use super::channel::{ProgressPublisher, ProgressSender};
use super::ledger::JobLedger;
use super::state::SharedProgressState;
use crate::error::{MediaBatchError, Result};
use crate::models::{Job, JobResult, JobStatus};

use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// 单个作业的执行者（真实实现为 ffmpeg 调用）
pub trait JobExecutor: Send + Sync {
    /// 同步执行作业，返回前外部工具必须已经退出
    fn execute(&self, job: &Job) -> Result<()>;
}

/// 批量调度器
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// 并行作业数
    workers: usize,
    /// 每个作业一个 worker
    one_per_job: bool,
}

impl Dispatcher {
    /// 创建固定大小的调度器，0 表示使用主机并行度
    pub fn new(jobs: usize) -> Self {
        let workers = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            workers,
            one_per_job: false,
        }
    }

    /// 退化策略：池大小等于作业数
    pub fn one_per_job() -> Self {
        Self {
            workers: 0,
            one_per_job: true,
        }
    }

    /// 针对给定作业数的实际池大小
    pub fn pool_size(&self, job_count: usize) -> usize {
        if self.one_per_job {
            job_count.max(1)
        } else {
            self.workers.max(1)
        }
    }

    /// 在当前线程上执行整个批次，返回时所有 worker 均已结束。
    ///
    /// 结果按作业在 `jobs` 中的顺序返回。提供 `progress` 时，
    /// 所有作业结束后推送一次终止哨兵。
    pub fn run<E>(
        &self,
        jobs: &[Job],
        executor: &E,
        state: &SharedProgressState,
        progress: Option<ProgressPublisher>,
    ) -> Result<Vec<JobResult>>
    where
        E: JobExecutor + ?Sized,
    {
        let ledger = JobLedger::new(jobs)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.pool_size(jobs.len()))
            .thread_name(|i| format!("mediabatch-worker-{}", i))
            .build()
            .map_err(|e| MediaBatchError::WorkerPool(e.to_string()))?;

        log::debug!(
            "dispatching {} jobs to {} workers",
            jobs.len(),
            pool.current_num_threads()
        );

        let sender = progress.as_ref().map(ProgressPublisher::sender);
        let results: Vec<JobResult> = pool.install(|| {
            jobs.par_iter()
                .map(|job| run_job(job, executor, &ledger, state, sender.as_ref()))
                .collect()
        });
        drop(sender);

        debug_assert!(ledger.all_terminal());

        if let Some(publisher) = progress {
            publisher.finish();
        }

        Ok(results)
    }

    /// 在后台线程上执行批次，调用方线程保持空闲以轮询进度
    pub fn spawn<E>(
        self,
        jobs: Vec<Job>,
        executor: Arc<E>,
        state: Arc<SharedProgressState>,
        progress: Option<ProgressPublisher>,
    ) -> Result<BatchHandle>
    where
        E: JobExecutor + ?Sized + 'static,
    {
        let handle = thread::Builder::new()
            .name("mediabatch-dispatcher".to_string())
            .spawn(move || self.run(&jobs, executor.as_ref(), &state, progress))
            .map_err(|e| MediaBatchError::WorkerPool(e.to_string()))?;
        Ok(BatchHandle { handle })
    }
}

/// 后台批次句柄
pub struct BatchHandle {
    handle: JoinHandle<Result<Vec<JobResult>>>,
}

impl BatchHandle {
    /// 阻塞直到调度线程及其所有 worker 结束
    pub fn join(self) -> Result<Vec<JobResult>> {
        self.handle
            .join()
            .map_err(|_| MediaBatchError::DispatcherPanicked)?
    }
}

/// worker 执行单个作业
fn run_job<E>(
    job: &Job,
    executor: &E,
    ledger: &JobLedger,
    state: &SharedProgressState,
    sender: Option<&ProgressSender>,
) -> JobResult
where
    E: JobExecutor + ?Sized,
{
    let started = Instant::now();

    if let Err(e) = ledger.start(job.id) {
        // 重复派发：不执行也不计数
        log::error!("refusing to start job {}: {}", job.id, e);
        return JobResult {
            job_id: job.id,
            input: job.input.clone(),
            status: JobStatus::Failed(e.to_string()),
            duration: started.elapsed(),
        };
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| executor.execute(job)))
        .unwrap_or_else(|payload| Err(MediaBatchError::JobPanicked(panic_message(&*payload))));

    let status = match outcome {
        Ok(()) => JobStatus::Succeeded,
        Err(e) => {
            log::warn!("job {} ({}) failed: {}", job.id, job.display_name(), e);
            JobStatus::Failed(e.to_string())
        }
    };

    if let Err(e) = ledger.complete(job.id, &status) {
        log::error!("job {}: {}", job.id, e);
    }

    let result = JobResult {
        job_id: job.id,
        input: job.input.clone(),
        status,
        duration: started.elapsed(),
    };
    log::debug!(
        "job {} finished in {:.2?}: {}",
        job.id,
        result.duration,
        result.status_text()
    );

    state.increment_with(|counts| {
        if let Some(sender) = sender {
            sender.send_update(counts.percent(), result.status_text());
        }
    });

    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
