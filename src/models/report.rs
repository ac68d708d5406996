//! # 作业结果与批处理报告
//!
//! `JobResult` 每个作业创建一次，之后不再修改；
//! `BatchReport` 在所有 worker 结束后汇总生成。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 创建 `JobResult`
//! - 被 `batch/aggregator.rs` 汇总为 `BatchReport`
//! - 被 `batch/export.rs` 导出

use std::path::PathBuf;
use std::time::Duration;

/// 作业终态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed(String),
}

impl JobStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }

    /// 失败原因
    pub fn reason(&self) -> Option<&str> {
        match self {
            JobStatus::Succeeded => None,
            JobStatus::Failed(reason) => Some(reason),
        }
    }
}

/// 单个作业的执行结果
#[derive(Debug, Clone)]
pub struct JobResult {
    pub job_id: usize,
    pub input: PathBuf,
    pub status: JobStatus,
    /// 墙钟耗时
    pub duration: Duration,
}

impl JobResult {
    /// 面向用户的状态文本
    pub fn status_text(&self) -> String {
        let name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.display().to_string());
        match &self.status {
            JobStatus::Succeeded => format!("Processed: {}", name),
            JobStatus::Failed(reason) => format!("Failed: {}: {}", name, reason),
        }
    }
}

/// 进度快照（消费端视角）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    /// 最近一条消息的百分比
    pub percent: f64,
    /// 最近一条消息的状态文本
    pub status: String,
}

/// 批处理最终报告
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 成功数量
    pub succeeded: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (作业编号, 原因)
    pub failures: Vec<(usize, String)>,
    /// 全部结果（按作业编号排序）
    pub results: Vec<JobResult>,
}

impl BatchReport {
    /// 合并单个作业结果
    pub fn merge(&mut self, result: JobResult) {
        match &result.status {
            JobStatus::Succeeded => self.succeeded += 1,
            JobStatus::Failed(reason) => {
                self.failed += 1;
                self.failures.push((result.job_id, reason.clone()));
            }
        }
        self.results.push(result);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// 部分失败：批处理完成但有作业失败
    pub fn is_partial_failure(&self) -> bool {
        self.failed > 0
    }

    /// 查找某个作业的失败原因
    pub fn failure_reason(&self, job_id: usize) -> Option<&str> {
        self.failures
            .iter()
            .find(|(id, _)| *id == job_id)
            .map(|(_, reason)| reason.as_str())
    }
}
