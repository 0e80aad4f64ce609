//! 日誌初始化（tracing-subscriber）

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌
///
/// # 環境變數
/// - RUST_LOG：日誌等級過濾（預設 info），例如 `RUST_LOG=order_calc=debug`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 測試用日誌（debug 等級，輸出交給測試框架擷取）
///
/// 可重複呼叫。
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
