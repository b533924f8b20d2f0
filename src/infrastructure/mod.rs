//! 基础设施层：日志、数据库与文档存储

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod store;
