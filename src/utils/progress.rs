//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式，并实现批处理的 `ProgressView`。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `indicatif` crate，终端检测使用 `console`

use crate::batch::ProgressView;
use crate::models::ProgressSnapshot;
use crate::utils::output;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// 创建百分比进度条
pub fn create_percent_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// 创建标准计数进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap()
            .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 根据 stderr 是否为终端选择进度显示方式
pub fn view_for_terminal(message: &str) -> Box<dyn ProgressView> {
    if Term::stderr().is_term() {
        Box::new(BarView::new(message))
    } else {
        Box::new(PlainView::default())
    }
}

/// 终端进度条
pub struct BarView {
    pb: ProgressBar,
}

impl BarView {
    pub fn new(message: &str) -> Self {
        Self {
            pb: create_percent_bar(message),
        }
    }
}

impl ProgressView for BarView {
    fn render(&mut self, snapshot: &ProgressSnapshot) {
        self.pb.set_position(snapshot.percent.round() as u64);
        self.pb.set_message(format!(
            "{}/{} {}",
            snapshot.completed, snapshot.total, snapshot.status
        ));
    }

    fn finish(&mut self, snapshot: &ProgressSnapshot) {
        self.render(snapshot);
        self.pb.finish_and_clear();
    }
}

/// 非终端输出：每次状态变化打印一行
#[derive(Default)]
pub struct PlainView {
    last_status: String,
}

impl ProgressView for PlainView {
    fn render(&mut self, snapshot: &ProgressSnapshot) {
        if snapshot.status != self.last_status {
            output::print_info(&format!(
                "[{:>3.0}%] {}/{} {}",
                snapshot.percent, snapshot.completed, snapshot.total, snapshot.status
            ));
            self.last_status = snapshot.status.clone();
        }
    }

    fn finish(&mut self, snapshot: &ProgressSnapshot) {
        self.render(snapshot);
    }
}
