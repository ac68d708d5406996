//! # 日志初始化
//!
//! 使用 `log` 门面 + `env_logger` 后端。默认级别 warn，`--verbose` 提升到 debug，
//! 设置了 `RUST_LOG` 时以环境变量为准。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用一次
//! - 使用 `env_logger`, `log`

use log::LevelFilter;

/// 初始化日志
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
