//! # 进度通道
//!
//! 无界 FIFO，worker 推送 `(percent, status)` 消息，批处理结束时推送一次终止哨兵。
//!
//! ## 句柄划分
//! - `ProgressPublisher`：调度器独占，唯一能发送哨兵的句柄（`finish` 消耗自身）
//! - `ProgressSender`：可克隆，分发给每个 worker，只能发送进度更新
//! - `ProgressReceiver`：消费端，只做非阻塞读取
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `batch/consumer.rs` 使用
//! - 使用 `crossbeam::channel`

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

/// 通道消息
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// 进度更新
    Update { percent: f64, status: String },
    /// 终止哨兵 ("DONE")
    Done,
}

/// 一次非阻塞读取的结果
#[derive(Debug, PartialEq)]
pub enum Drained {
    /// 本轮读到的消息（可能为空），按入队顺序
    Events(Vec<ProgressEvent>),
    /// 所有发送端已关闭且队列为空
    Disconnected(Vec<ProgressEvent>),
}

/// 创建进度通道
pub fn progress_channel() -> (ProgressPublisher, ProgressReceiver) {
    let (tx, rx) = channel::unbounded();
    (ProgressPublisher { tx }, ProgressReceiver { rx })
}

/// 调度器持有的发布端
#[derive(Debug)]
pub struct ProgressPublisher {
    tx: Sender<ProgressEvent>,
}

impl ProgressPublisher {
    /// 为 worker 创建发送端
    pub fn sender(&self) -> ProgressSender {
        ProgressSender {
            tx: self.tx.clone(),
        }
    }

    /// 推送终止哨兵。消耗发布端，保证哨兵只发送一次。
    pub fn finish(self) {
        if self.tx.send(ProgressEvent::Done).is_err() {
            log::debug!("progress receiver dropped before batch end");
        }
    }
}

/// worker 持有的发送端
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: Sender<ProgressEvent>,
}

impl ProgressSender {
    pub fn send_update(&self, percent: f64, status: impl Into<String>) {
        let event = ProgressEvent::Update {
            percent,
            status: status.into(),
        };
        // 消费端已退出不影响作业执行
        if self.tx.send(event).is_err() {
            log::debug!("progress receiver dropped, update discarded");
        }
    }
}

/// 消费端
#[derive(Debug)]
pub struct ProgressReceiver {
    rx: Receiver<ProgressEvent>,
}

impl ProgressReceiver {
    /// 非阻塞地取出当前队列中的全部消息
    pub fn drain(&self) -> Drained {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Drained::Events(events),
                Err(TryRecvError::Disconnected) => return Drained::Disconnected(events),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order_and_single_sentinel() {
        let (publisher, receiver) = progress_channel();
        let sender = publisher.sender();
        sender.send_update(50.0, "Processed: a.mp4");
        sender.send_update(100.0, "Processed: b.mp4");
        publisher.finish();
        drop(sender);

        let events = match receiver.drain() {
            Drained::Disconnected(events) => events,
            other => panic!("expected disconnected, got {:?}", other),
        };
        assert_eq!(
            events,
            vec![
                ProgressEvent::Update {
                    percent: 50.0,
                    status: "Processed: a.mp4".into()
                },
                ProgressEvent::Update {
                    percent: 100.0,
                    status: "Processed: b.mp4".into()
                },
                ProgressEvent::Done,
            ]
        );
    }

    #[test]
    fn test_drain_on_empty_channel_returns_immediately() {
        let (publisher, receiver) = progress_channel();
        assert_eq!(receiver.drain(), Drained::Events(vec![]));
        drop(publisher);
        assert_eq!(receiver.drain(), Drained::Disconnected(vec![]));
    }

    #[test]
    fn test_updates_from_many_threads_all_arrive() {
        let (publisher, receiver) = progress_channel();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sender = publisher.sender();
                std::thread::spawn(move || {
                    for j in 0..10 {
                        sender.send_update((i * 10 + j) as f64, format!("{}-{}", i, j));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(publisher);

        match receiver.drain() {
            Drained::Disconnected(events) => assert_eq!(events.len(), 40),
            other => panic!("expected disconnected, got {:?}", other),
        }
    }
}
