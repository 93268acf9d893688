//! 时间工具函数 — 菜单可用窗口和账期计算

use chrono::{DateTime, Duration, Utc};

/// 菜单可用窗口是否有效
///
/// 窗口必须整体位于未来：`now < start < end`。
pub fn valid_availability_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    now < start && start < end
}

/// 发票默认到期时间：创建时间 + 1 天
pub fn default_payment_due_date(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(1)
}
