//! # 数据模型模块
//!
//! 定义作业、作业结果、进度快照和批处理报告。
//!
//! ## 依赖关系
//! - 被 `batch/`, `ffmpeg/` 和 `commands/` 使用
//! - 子模块: job, report

pub mod job;
pub mod report;

pub use job::{Job, JobKind, JobState};
pub use report::{BatchReport, JobResult, JobStatus, ProgressSnapshot};
