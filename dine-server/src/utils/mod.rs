//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型
//! - [`logger`] - 日志初始化
//! - [`time`] - 时间窗口和账期计算

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResult};
