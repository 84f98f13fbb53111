/// 日志工具模块
///
/// 提供订阅器初始化和日志格式化的辅助函数。
/// 日志写到 stderr，stdout 留给答题界面。
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// `RUST_LOG` 优先；否则默认 `info`，`verbose` 时为 `debug`。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 使用的模型
/// - `difficulty`: 默认难度
/// - `max_retries`: 每道题的最大尝试次数
pub fn log_startup(model_name: &str, difficulty: &str, max_retries: u32) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {}", model_name);
    info!("📊 难度: {} | 每题最多尝试 {} 次", difficulty, max_retries);
    info!("{}", "=".repeat(60));
}

/// 记录最终得分
pub fn log_final_score(subject: &str, correct: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("📊 测验完成 (学科: {})", subject);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 答对: {}/{}", correct, total);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
