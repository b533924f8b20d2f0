//! 商品目录与 SKU 编辑

pub mod handler;
pub mod model;
pub mod service;
pub mod sku;
