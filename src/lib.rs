//! # storefront
//!
//! 多租户店铺服务：
//! - 按租户设置解析首页主题，缺失时回退到默认主题
//! - 商品后台的 SKU 组合生成与批量编辑

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
