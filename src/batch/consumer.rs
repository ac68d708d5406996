//! # 进度消费端
//!
//! 按固定间隔轮询进度通道：每一轮非阻塞地取空队列，
//! 以最近一条消息更新百分比和状态文本，看到哨兵后停止轮询。
//!
//! 渲染通过 `ProgressView` 抽象，终端进度条、纯文本输出和测试记录器都实现该 trait。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 驱动
//! - 使用 `batch/channel.rs`, `batch/state.rs`
//! - 渲染实现位于 `utils/progress.rs`

use super::channel::{Drained, ProgressEvent, ProgressReceiver};
use super::state::SharedProgressState;
use crate::models::ProgressSnapshot;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// 默认轮询间隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 进度订阅接口
pub trait ProgressView {
    /// 每轮有新消息时调用
    fn render(&mut self, snapshot: &ProgressSnapshot);

    /// 收到哨兵（或通道关闭）后调用一次
    fn finish(&mut self, snapshot: &ProgressSnapshot);
}

/// 单轮轮询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 继续轮询
    Pending,
    /// 已看到哨兵，停止轮询
    Finished,
}

/// 进度消费者
pub struct ProgressConsumer {
    receiver: ProgressReceiver,
    state: Arc<SharedProgressState>,
    snapshot: ProgressSnapshot,
    finished: bool,
    sentinels: usize,
}

impl ProgressConsumer {
    pub fn new(receiver: ProgressReceiver, state: Arc<SharedProgressState>) -> Self {
        let counts = state.snapshot();
        Self {
            receiver,
            state,
            snapshot: ProgressSnapshot {
                completed: counts.completed,
                total: counts.total,
                ..Default::default()
            },
            finished: false,
            sentinels: 0,
        }
    }

    /// 当前可见进度
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 已观察到的哨兵数量
    pub fn sentinels_seen(&self) -> usize {
        self.sentinels
    }

    /// 执行一轮非阻塞读取
    pub fn tick<V: ProgressView + ?Sized>(&mut self, view: &mut V) -> Tick {
        if self.is_finished() {
            return Tick::Finished;
        }

        let (events, disconnected) = match self.receiver.drain() {
            Drained::Events(events) => (events, false),
            Drained::Disconnected(events) => (events, true),
        };

        let had_events = !events.is_empty();
        for event in events {
            match event {
                ProgressEvent::Update { percent, status } => {
                    self.snapshot.percent = percent;
                    self.snapshot.status = status;
                }
                ProgressEvent::Done => {
                    self.sentinels += 1;
                    self.finished = true;
                    break;
                }
            }
        }

        let counts = self.state.snapshot();
        self.snapshot.completed = counts.completed;
        self.snapshot.total = counts.total;

        if disconnected && !self.finished {
            // 发布端未发送哨兵就被丢弃（调度线程异常退出）
            log::warn!("progress channel closed without a completion marker");
            self.finished = true;
        }

        if self.finished {
            view.finish(&self.snapshot);
            Tick::Finished
        } else {
            if had_events {
                view.render(&self.snapshot);
            }
            Tick::Pending
        }
    }

    /// 轮询直到结束。每轮之间休眠 `interval`，读取本身从不阻塞。
    pub fn run<V: ProgressView + ?Sized>(&mut self, view: &mut V, interval: Duration) {
        while self.tick(view) == Tick::Pending {
            thread::sleep(interval);
        }
    }
}
