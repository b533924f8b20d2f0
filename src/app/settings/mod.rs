//! 店铺设置：支付开关、币种、首页主题与站点信息

pub mod handler;
pub mod model;
pub mod service;
