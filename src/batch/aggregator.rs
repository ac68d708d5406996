//! # 结果汇总
//!
//! 等待所有 worker 结束，把 `JobResult` 汇总为唯一的 `BatchReport`。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs`, `commands/strip.rs` 调用
//! - 使用 `batch/runner.rs` 的 `BatchHandle`

use super::runner::BatchHandle;
use crate::error::Result;
use crate::models::{BatchReport, JobResult};

/// 结果汇总器
pub struct ResultAggregator;

impl ResultAggregator {
    /// 阻塞等待后台批次结束并生成报告
    pub fn join(handle: BatchHandle) -> Result<BatchReport> {
        let results = handle.join()?;
        Ok(Self::collect(results))
    }

    /// 汇总已完成的结果，失败详情按作业编号排序
    pub fn collect<I>(results: I) -> BatchReport
    where
        I: IntoIterator<Item = JobResult>,
    {
        let mut results: Vec<JobResult> = results.into_iter().collect();
        results.sort_by_key(|r| r.job_id);

        let mut report = BatchReport::default();
        for result in results {
            report.merge(result);
        }
        report
    }
}
