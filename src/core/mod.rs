//! 核心层：错误、响应封装、中间件与租户识别

pub mod error;
pub mod middleware;
pub mod response;
pub mod tenant;
