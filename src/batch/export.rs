//! # 报告导出
//!
//! 将每个作业的结果导出为 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `csv` + `serde` 写入记录

use crate::error::{MediaBatchError, Result};
use crate::models::BatchReport;

use serde::Serialize;
use std::path::Path;

/// CSV 行
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    job_id: usize,
    input: String,
    status: &'a str,
    reason: &'a str,
    duration_ms: u64,
}

/// 导出全部作业结果
pub fn to_csv(report: &BatchReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for result in &report.results {
        let status = if result.status.is_success() {
            "succeeded"
        } else {
            "failed"
        };
        let reason = result.status.reason().unwrap_or("");
        wtr.serialize(ResultRow {
            job_id: result.job_id,
            input: result.input.display().to_string(),
            status,
            reason,
            duration_ms: result.duration.as_millis() as u64,
        })?;
    }

    wtr.flush().map_err(|e| MediaBatchError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
