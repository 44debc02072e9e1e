/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{ExamContent, ExamContentPayload};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别；重复调用无副作用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 考试内容管理 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录待提交的请求体（debug 级别）
pub fn log_payload(payload: &ExamContentPayload) {
    debug!(
        "请求体: {}",
        serde_json::to_string(payload).unwrap_or_else(|e| format!("<无法序列化: {}>", e))
    );
    info!(
        "📋 {} | {} | {} 个段落",
        payload.exam_code,
        truncate_text(&payload.title, 40),
        payload.exam_info_sections.len()
    );
}

/// 逐条输出考试内容列表
pub fn log_records(records: &[ExamContent]) {
    info!("{}", "─".repeat(60));
    for (i, record) in records.iter().enumerate() {
        info!("{:>3}. {}", i + 1, truncate_text(&record.summary(), 80));
    }
    info!("{}", "─".repeat(60));
    info!("共 {} 条", records.len());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
