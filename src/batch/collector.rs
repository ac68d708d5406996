//! # 作业枚举器
//!
//! 扫描输入目录（不递归），按扩展名白名单收集媒体文件并生成作业列表。
//!
//! ## 功能
//! - 扩展名白名单匹配（忽略大小写）
//! - 目录不存在或无匹配文件时立即失败，早于任何 worker 启动
//! - 结果按路径排序，保证重复枚举得到相同作业集
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{MediaBatchError, Result};
use crate::models::Job;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认视频扩展名白名单
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"];

/// 作业枚举器
pub struct JobEnumerator {
    /// 输入目录
    input: PathBuf,
    /// 扩展名白名单（小写，不含点）
    extensions: Vec<String>,
    /// 跳过以此前缀开头的文件名
    skip_prefix: Option<String>,
}

impl JobEnumerator {
    /// 创建新的枚举器，使用默认白名单
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_prefix: None,
        }
    }

    /// 设置扩展名白名单（逗号分隔，可带点）
    pub fn with_extensions(mut self, list: &str) -> Self {
        let extensions: Vec<String> = list
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// 跳过文件名以 `prefix` 开头的文件
    pub fn skipping_prefix(mut self, prefix: &str) -> Self {
        self.skip_prefix = Some(prefix.to_string());
        self
    }

    /// 收集所有匹配的文件
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if !self.input.is_dir() {
            return Err(MediaBatchError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("skipping unreadable entry in {}: {}", self.input.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| !self.is_skipped(e.path()))
            .filter(|e| self.matches_extension(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        if files.is_empty() {
            return Err(MediaBatchError::NoMatchingFiles {
                path: self.input.display().to_string(),
                extensions: self.extensions.join(","),
            });
        }

        files.sort();
        Ok(files)
    }

    /// 生成作业列表，`make` 负责为每个文件构造作业（编号从 1 开始）
    pub fn enumerate<F>(&self, mut make: F) -> Result<Vec<Job>>
    where
        F: FnMut(usize, PathBuf) -> Result<Job>,
    {
        self.collect_files()?
            .into_iter()
            .enumerate()
            .map(|(i, path)| make(i + 1, path))
            .collect()
    }

    fn is_skipped(&self, path: &Path) -> bool {
        match (&self.skip_prefix, path.file_name().and_then(|n| n.to_str())) {
            (Some(prefix), Some(name)) => name.starts_with(prefix.as_str()),
            _ => false,
        }
    }

    /// 检查文件扩展名是否在白名单中
    fn matches_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}
