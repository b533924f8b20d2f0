//! 租户文档存储
//!
//! 文档以 (租户, 集合, id) 为键，值为 JSON。默认保存在内存中；启用
//! `database` 特性并配置连接串时保存在 Postgres 的 `storefront_documents` 表。

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[cfg(feature = "database")]
use sqlx::{postgres::PgPool, Row};

use crate::core::tenant::TenantId;

pub const PRODUCTS: &str = "products";
pub const SETTINGS: &str = "settings";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("内存存储锁已损坏")]
    Poisoned,
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

type DocumentKey = (String, String, String);

#[derive(Clone)]
pub enum DocumentStore {
    Memory(Arc<RwLock<BTreeMap<DocumentKey, Value>>>),
    #[cfg(feature = "database")]
    Postgres(PgPool),
}

fn key(tenant: &TenantId, collection: &str, id: &str) -> DocumentKey {
    (tenant.as_str().to_string(), collection.to_string(), id.to_string())
}

impl DocumentStore {
    pub fn memory() -> Self {
        DocumentStore::Memory(Arc::new(RwLock::new(BTreeMap::new())))
    }

    #[cfg(feature = "database")]
    pub fn postgres(pool: PgPool) -> Self {
        DocumentStore::Postgres(pool)
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            DocumentStore::Memory(_) => "in-memory",
            #[cfg(feature = "database")]
            DocumentStore::Postgres(_) => "postgres",
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        tenant: &TenantId,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        match self {
            DocumentStore::Memory(docs) => {
                let value = {
                    let docs = docs.read().map_err(|_| StoreError::Poisoned)?;
                    docs.get(&key(tenant, collection, id)).cloned()
                };
                value
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(StoreError::from)
            }
            #[cfg(feature = "database")]
            DocumentStore::Postgres(pool) => {
                let row = sqlx::query(
                    "SELECT body FROM storefront_documents \
                     WHERE tenant_id = $1 AND collection = $2 AND id = $3",
                )
                .bind(tenant.as_str())
                .bind(collection)
                .bind(id)
                .fetch_optional(pool)
                .await?;

                match row {
                    Some(row) => {
                        let body: String = row.try_get("body")?;
                        Ok(Some(serde_json::from_str(&body)?))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    pub async fn put<T: Serialize>(
        &self,
        tenant: &TenantId,
        collection: &str,
        id: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        match self {
            DocumentStore::Memory(docs) => {
                let value = serde_json::to_value(document)?;
                let mut docs = docs.write().map_err(|_| StoreError::Poisoned)?;
                docs.insert(key(tenant, collection, id), value);
                Ok(())
            }
            #[cfg(feature = "database")]
            DocumentStore::Postgres(pool) => {
                let body = serde_json::to_string(document)?;
                sqlx::query(
                    "INSERT INTO storefront_documents (tenant_id, collection, id, body) \
                     VALUES ($1, $2, $3, $4) \
                     ON CONFLICT (tenant_id, collection, id) \
                     DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()",
                )
                .bind(tenant.as_str())
                .bind(collection)
                .bind(id)
                .bind(body)
                .execute(pool)
                .await?;
                Ok(())
            }
        }
    }

    /// 删除文档，返回文档此前是否存在
    pub async fn delete(
        &self,
        tenant: &TenantId,
        collection: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        match self {
            DocumentStore::Memory(docs) => {
                let mut docs = docs.write().map_err(|_| StoreError::Poisoned)?;
                Ok(docs.remove(&key(tenant, collection, id)).is_some())
            }
            #[cfg(feature = "database")]
            DocumentStore::Postgres(pool) => {
                let result = sqlx::query(
                    "DELETE FROM storefront_documents \
                     WHERE tenant_id = $1 AND collection = $2 AND id = $3",
                )
                .bind(tenant.as_str())
                .bind(collection)
                .bind(id)
                .execute(pool)
                .await?;
                Ok(result.rows_affected() > 0)
            }
        }
    }

    /// 列出某租户某集合下的全部文档，按 id 排序
    pub async fn list<T: DeserializeOwned>(
        &self,
        tenant: &TenantId,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        match self {
            DocumentStore::Memory(docs) => {
                let values: Vec<Value> = {
                    let docs = docs.read().map_err(|_| StoreError::Poisoned)?;
                    docs.iter()
                        .filter(|((t, c, _), _)| t == tenant.as_str() && c == collection)
                        .map(|(_, v)| v.clone())
                        .collect()
                };
                values
                    .into_iter()
                    .map(|v| serde_json::from_value(v).map_err(StoreError::from))
                    .collect()
            }
            #[cfg(feature = "database")]
            DocumentStore::Postgres(pool) => {
                let rows = sqlx::query(
                    "SELECT body FROM storefront_documents \
                     WHERE tenant_id = $1 AND collection = $2 ORDER BY id",
                )
                .bind(tenant.as_str())
                .bind(collection)
                .fetch_all(pool)
                .await?;

                rows.iter()
                    .map(|row| -> Result<T, StoreError> {
                        let body: String = row.try_get("body")?;
                        Ok(serde_json::from_str(&body)?)
                    })
                    .collect()
            }
        }
    }
}
