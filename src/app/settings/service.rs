//! 店铺设置业务服务

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::model::{ShopSettings, UpdateShopSettingsRequest};
use crate::core::tenant::TenantId;
use crate::infrastructure::store::{DocumentStore, StoreError, SETTINGS};

const SETTINGS_ID: &str = "shop";

#[derive(Clone)]
pub struct SettingsService {
    store: DocumentStore,
    /// 串行化读-改-写
    write_lock: Arc<Mutex<()>>,
}

impl SettingsService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 读取租户设置，未保存过时返回默认值
    pub async fn get(&self, tenant: &TenantId) -> Result<ShopSettings, StoreError> {
        Ok(self
            .store
            .get(tenant, SETTINGS, SETTINGS_ID)
            .await?
            .unwrap_or_default())
    }

    pub async fn update<F>(
        &self,
        tenant: &TenantId,
        req: UpdateShopSettingsRequest,
        is_selectable: F,
    ) -> Result<ShopSettings, StoreError>
    where
        F: Fn(&str) -> bool,
    {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.get(tenant).await?;
        let previous_theme = settings.home_theme_id.clone();
        let ignored = settings.apply(req, is_selectable);
        if !ignored.is_empty() {
            warn!("租户 {} 的设置更新忽略了无效字段: {:?}", tenant, ignored);
        }

        self.store.put(tenant, SETTINGS, SETTINGS_ID, &settings).await?;

        if settings.home_theme_id != previous_theme {
            info!(
                "租户 {} 首页主题切换: {:?} -> {:?}",
                tenant, previous_theme, settings.home_theme_id
            );
        }
        Ok(settings)
    }
}
