//! 统一响应封装

use serde::Serialize;
use uuid::Uuid;

/// 成功响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub request_id: String,
    pub timestamp: String,
}

/// 列表数据，附带总数
#[derive(Debug, Serialize)]
pub struct ListData<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<ListData<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self::success(ListData {
            total: items.len(),
            items,
        })
    }
}
