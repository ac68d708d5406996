//! # 批量调度模块
//!
//! 把独立的媒体处理作业分派到 worker 池，汇总进度与结果。
//!
//! ## 数据流
//! ```text
//! JobEnumerator → Vec<Job> → Dispatcher ──┬─→ SharedProgressState ←─ ProgressConsumer
//!                                         ├─→ ProgressChannel ─────→ ProgressConsumer
//!                                         └─→ BatchHandle → ResultAggregator → BatchReport
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `crossbeam` 通道和 `parking_lot` 互斥锁

pub mod aggregator;
pub mod channel;
pub mod collector;
pub mod consumer;
pub mod export;
pub mod ledger;
pub mod runner;
pub mod state;

pub use aggregator::ResultAggregator;
pub use channel::progress_channel;
pub use collector::JobEnumerator;
pub use consumer::{ProgressConsumer, ProgressView, DEFAULT_POLL_INTERVAL};
pub use runner::{Dispatcher, JobExecutor};
pub use state::SharedProgressState;
