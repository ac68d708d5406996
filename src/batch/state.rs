//! # 共享进度状态
//!
//! 已完成/总数计数器，互斥锁保护。是"完成了多少"的唯一来源：
//! 只由作业完成路径修改，只由消费端读取。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 在作业完成时递增
//! - 被 `batch/consumer.rs` 拉取快照
//! - 使用 `parking_lot::Mutex`

use parking_lot::Mutex;

/// 一致的 (completed, total) 计数对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCounts {
    pub completed: usize,
    pub total: usize,
}

impl ProgressCounts {
    /// 完成百分比，空批次视为 100%
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// 跨 worker 共享的进度计数器
#[derive(Debug)]
pub struct SharedProgressState {
    completed: Mutex<usize>,
    total: usize,
}

impl SharedProgressState {
    /// `total` 在派发时确定，之后不变
    pub fn new(total: usize) -> Self {
        Self {
            completed: Mutex::new(0),
            total,
        }
    }

    /// 作业完成时调用一次，返回递增后的计数
    #[cfg(test)]
    pub fn increment(&self) -> ProgressCounts {
        self.increment_with(|counts| counts)
    }

    /// 递增并在持锁期间执行 `f`。
    ///
    /// worker 在 `f` 中推送进度消息，使通道中的百分比与计数顺序一致。
    pub fn increment_with<R>(&self, f: impl FnOnce(ProgressCounts) -> R) -> R {
        let mut completed = self.completed.lock();
        let current = ProgressCounts {
            completed: *completed,
            total: self.total,
        };
        if current.is_complete() {
            log::warn!(
                "progress counter already at total ({}), ignoring extra increment",
                self.total
            );
        } else {
            *completed += 1;
        }
        f(ProgressCounts {
            completed: *completed,
            total: self.total,
        })
    }

    /// 读取一致的计数快照
    pub fn snapshot(&self) -> ProgressCounts {
        ProgressCounts {
            completed: *self.completed.lock(),
            total: self.total,
        }
    }
}
