//! # 统一错误处理模块
//!
//! 定义 mediabatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 输入错误：在派发任何作业之前报告，直接终止
//! - 外部工具错误：在 worker 内部捕获，转换为 `JobStatus::Failed`
//! - I/O 错误：原地处理流程中出现即终止该流程
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mediabatch 统一错误类型
#[derive(Error, Debug)]
pub enum MediaBatchError {
    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No files with extensions [{extensions}] found in {path}")]
    NoMatchingFiles { path: String, extensions: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 外部工具错误（按作业捕获）
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    ToolNotFound { command: String },

    #[error("{command} exited with {status}{}", detail_suffix(.stderr))]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Output not produced: {path}")]
    OutputMissing { path: String },

    #[error("Failed to probe {path}: {reason}")]
    ProbeFailed { path: String, reason: String },

    #[error("Job panicked: {0}")]
    JobPanicked(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace {target} with {temp}")]
    ReplaceFailed {
        temp: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 调度基础设施
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("Dispatcher thread panicked")]
    DispatcherPanicked,

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl MediaBatchError {
    /// 是否属于输入错误（派发前终止）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MediaBatchError::DirectoryNotFound { .. }
                | MediaBatchError::NoMatchingFiles { .. }
                | MediaBatchError::InvalidArgument(_)
        )
    }
}

/// 取 stderr 最后一行非空内容作为附加说明
fn detail_suffix(stderr: &str) -> String {
    match stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => format!(": {}", line),
        None => String::new(),
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MediaBatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_keeps_last_stderr_line() {
        let err = MediaBatchError::ToolFailed {
            command: "ffmpeg".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "ffmpeg version 6\n\nclip.mp4: Invalid data found\n\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ffmpeg exited with exit status: 1: clip.mp4: Invalid data found"
        );
    }

    #[test]
    fn test_tool_failed_without_stderr() {
        let err = MediaBatchError::ToolFailed {
            command: "ffmpeg".to_string(),
            status: "exit status: 2".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "ffmpeg exited with exit status: 2");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(MediaBatchError::InvalidArgument("x".into()).is_input_error());
        assert!(MediaBatchError::DirectoryNotFound { path: "a".into() }.is_input_error());
        assert!(!MediaBatchError::DispatcherPanicked.is_input_error());
    }
}
