//! 日志基础设施

use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 初始化日志系统
///
/// 这个函数会：
/// 1. 创建日志目录
/// 2. 设置按日期分割的文件日志
/// 3. 按配置同时输出到控制台
///
/// `RUST_LOG` 存在时优先于配置中的日志级别。返回的 guard 必须在进程
/// 生命周期内持有，否则缓冲中的日志会丢失。
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_path)?;

    let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
    let (file_writer, guard) = non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handlebars=warn,{}", config.level)));

    let console_layer = config
        .console_output
        .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false)
                .with_thread_names(true),
        )
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}
