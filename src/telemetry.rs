//! 日志与追踪系统

use crate::config::LoggingConfig;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// 日志过滤器：RUST_LOG 优先，其次配置中的级别；sqlx 语句日志降到 warn
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", level)))
}

/// 初始化日志与追踪系统。重复初始化（例如测试中）返回错误而不是 panic。
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let log_layer = match logging.format.to_lowercase().as_str() {
        // 生产环境：JSON，记录协调 span 的耗时
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        _ => tracing_subscriber::fmt::layer().pretty().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(build_filter(&logging.level))
        .with(log_layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %logging.level,
        format = %logging.format,
        "Tracing initialized"
    );

    Ok(())
}
