//! 租户识别
//!
//! 每个请求通过 `x-tenant-id` 头声明所属租户，缺省为 `default`。

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::CoreError;

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const DEFAULT_TENANT: &str = "default";

const MAX_TENANT_LEN: usize = 64;

/// 租户标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// 解析租户标识，只允许字母、数字、`-` 和 `_`
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let id = raw.trim();
        if id.is_empty() || id.len() > MAX_TENANT_LEN {
            return Err(CoreError::BadRequest(format!(
                "租户标识长度必须在 1 到 {} 之间",
                MAX_TENANT_LEN
            )));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::BadRequest(format!("无效的租户标识: {}", id)));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self(DEFAULT_TENANT.to_string())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(TENANT_HEADER) {
            None => Ok(TenantId::default()),
            Some(value) => {
                let raw = value
                    .to_str()
                    .map_err(|_| CoreError::BadRequest("租户标识必须是 ASCII".to_string()))?;
                TenantId::parse(raw)
            }
        }
    }
}
