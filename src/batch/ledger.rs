//! # 作业台账
//!
//! 记录每个作业的状态，只允许 Pending → Running → {Succeeded, Failed} 单向迁移。
//! worker 在调用外部工具前必须先把作业置为 Running，重复启动会被拒绝。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `parking_lot::Mutex`

use crate::error::{MediaBatchError, Result};
use crate::models::{Job, JobState, JobStatus};

use parking_lot::Mutex;
use std::collections::HashMap;

/// 作业状态台账
#[derive(Debug)]
pub struct JobLedger {
    states: Mutex<HashMap<usize, JobState>>,
}

impl JobLedger {
    /// 所有作业以 Pending 登记；作业编号重复时拒绝创建
    pub fn new(jobs: &[Job]) -> Result<Self> {
        let mut states = HashMap::with_capacity(jobs.len());
        for job in jobs {
            if states.insert(job.id, JobState::Pending).is_some() {
                return Err(MediaBatchError::InvalidArgument(format!(
                    "duplicate job id {}",
                    job.id
                )));
            }
        }
        Ok(Self {
            states: Mutex::new(states),
        })
    }

    /// Pending → Running
    pub fn start(&self, id: usize) -> Result<()> {
        self.transition(id, JobState::Running)
    }

    /// Running → 终态
    pub fn complete(&self, id: usize, status: &JobStatus) -> Result<()> {
        let next = if status.is_success() {
            JobState::Succeeded
        } else {
            JobState::Failed
        };
        self.transition(id, next)
    }

    #[cfg(test)]
    pub fn state(&self, id: usize) -> Option<JobState> {
        self.states.lock().get(&id).copied()
    }

    /// 所有作业是否都已到达终态
    pub fn all_terminal(&self) -> bool {
        self.states.lock().values().all(|s| s.is_terminal())
    }

    fn transition(&self, id: usize, next: JobState) -> Result<()> {
        let mut states = self.states.lock();
        let current = states
            .get_mut(&id)
            .ok_or_else(|| MediaBatchError::InvalidArgument(format!("unknown job id {}", id)))?;
        if !current.can_transition_to(next) {
            return Err(MediaBatchError::InvalidArgument(format!(
                "job {} cannot move from {:?} to {:?}",
                id, current, next
            )));
        }
        *current = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobKind;
    use std::path::PathBuf;

    fn jobs(ids: &[usize]) -> Vec<Job> {
        ids.iter()
            .map(|&id| {
                let path = PathBuf::from(format!("{}.mp4", id));
                Job::new(id, path.clone(), path, JobKind::StripMetadata)
            })
            .collect()
    }

    #[test]
    fn test_job_runs_once() {
        let ledger = JobLedger::new(&jobs(&[1, 2])).unwrap();
        ledger.start(1).unwrap();
        assert!(ledger.start(1).is_err());
        ledger.complete(1, &JobStatus::Succeeded).unwrap();
        assert!(ledger.start(1).is_err());
        assert_eq!(ledger.state(1), Some(JobState::Succeeded));
        assert_eq!(ledger.state(2), Some(JobState::Pending));
        assert!(!ledger.all_terminal());
    }

    #[test]
    fn test_cannot_complete_without_start() {
        let ledger = JobLedger::new(&jobs(&[7])).unwrap();
        assert!(ledger.complete(7, &JobStatus::Failed("x".into())).is_err());
        ledger.start(7).unwrap();
        ledger.complete(7, &JobStatus::Failed("x".into())).unwrap();
        assert_eq!(ledger.state(7), Some(JobState::Failed));
        assert!(ledger.all_terminal());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = JobLedger::new(&jobs(&[1, 1])).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unknown_id_rejected() {
        let ledger = JobLedger::new(&jobs(&[1])).unwrap();
        assert!(ledger.start(9).is_err());
    }
}
