//! 商品业务服务

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::model::{CreateProductRequest, Product, SkuEditor, UpdateProductRequest};
use super::sku;
use crate::core::error::CoreError;
use crate::core::tenant::TenantId;
use crate::infrastructure::store::{DocumentStore, PRODUCTS};

#[derive(Clone)]
pub struct ProductService {
    store: DocumentStore,
    write_lock: Arc<Mutex<()>>,
}

impl ProductService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 按关键字过滤，创建时间倒序
    pub async fn list(&self, tenant: &TenantId, keyword: Option<&str>) -> Result<Vec<Product>, CoreError> {
        let mut products: Vec<Product> = self.store.list(tenant, PRODUCTS).await?;
        if let Some(keyword) = keyword {
            products.retain(|p| p.matches_keyword(keyword));
        }
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// 首页推荐：上架商品中最新的若干个
    pub async fn featured(&self, tenant: &TenantId, limit: usize) -> Result<Vec<Product>, CoreError> {
        let mut products = self.list(tenant, None).await?;
        products.retain(Product::is_on_sale);
        products.truncate(limit);
        Ok(products)
    }

    pub async fn get(&self, tenant: &TenantId, id: Uuid) -> Result<Product, CoreError> {
        self.store
            .get(tenant, PRODUCTS, &id.to_string())
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("商品不存在: {}", id)))
    }

    pub async fn create(&self, tenant: &TenantId, req: CreateProductRequest) -> Result<Product, CoreError> {
        let product = Product::new(req)?;
        self.store
            .put(tenant, PRODUCTS, &product.id.to_string(), &product)
            .await?;
        info!(
            "租户 {} 创建商品 {} ({} 个 SKU)",
            tenant,
            product.id,
            product.skus.len()
        );
        Ok(product)
    }

    pub async fn update(
        &self,
        tenant: &TenantId,
        id: Uuid,
        req: UpdateProductRequest,
    ) -> Result<Product, CoreError> {
        let _guard = self.write_lock.lock().await;

        let mut product = self.get(tenant, id).await?;
        product.apply_update(req)?;
        self.store
            .put(tenant, PRODUCTS, &id.to_string(), &product)
            .await?;
        info!(
            "租户 {} 更新商品 {} ({} 个 SKU)",
            tenant,
            id,
            product.skus.len()
        );
        Ok(product)
    }

    pub async fn delete(&self, tenant: &TenantId, id: Uuid) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        if !self.store.delete(tenant, PRODUCTS, &id.to_string()).await? {
            return Err(CoreError::NotFound(format!("商品不存在: {}", id)));
        }
        info!("租户 {} 删除商品 {}", tenant, id);
        Ok(())
    }

    /// 编辑器初始数据：已保存的行与反推出的维度
    pub async fn editor(&self, tenant: &TenantId, id: Uuid) -> Result<SkuEditor, CoreError> {
        let product = self.get(tenant, id).await?;
        let rows = product.sku_rows();
        let dimensions = sku::infer_dimensions(&rows);
        Ok(SkuEditor {
            product_id: product.id,
            rows,
            dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::sku::{generate, VariantDimension};
    use tokio::sync::Barrier;

    fn request(title: &str) -> CreateProductRequest {
        CreateProductRequest {
            title: title.to_string(),
            summary: String::new(),
            price: "10".to_string(),
            track_stock: None,
            stock: 0,
            cover: String::new(),
            status: None,
            skus: None,
        }
    }

    #[tokio::test]
    async fn test_create_list_and_delete() {
        let service = ProductService::new(DocumentStore::memory());
        let tenant = TenantId::default();

        let jacket = service.create(&tenant, request("Trail Jacket")).await.unwrap();
        service.create(&tenant, request("Wool Socks")).await.unwrap();

        assert_eq!(service.list(&tenant, None).await.unwrap().len(), 2);
        let found = service.list(&tenant, Some("jacket")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, jacket.id);

        service.delete(&tenant, jacket.id).await.unwrap();
        assert!(matches!(
            service.get(&tenant, jacket.id).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&tenant, jacket.id).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_update_never_resurrects_deleted_product() {
        let service = ProductService::new(DocumentStore::memory());
        let tenant = TenantId::default();

        for _ in 0..50 {
            let id = service.create(&tenant, request("Racy")).await.unwrap().id;
            let barrier = Arc::new(Barrier::new(2));

            let updater = {
                let (service, tenant, barrier) = (service.clone(), tenant.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    service
                        .update(
                            &tenant,
                            id,
                            UpdateProductRequest {
                                title: Some("Renamed".into()),
                                ..Default::default()
                            },
                        )
                        .await
                })
            };
            let deleter = {
                let (service, tenant, barrier) = (service.clone(), tenant.clone(), barrier.clone());
                tokio::spawn(async move {
                    barrier.wait().await;
                    service.delete(&tenant, id).await
                })
            };

            let updated = updater.await.unwrap();
            deleter.await.unwrap().unwrap();

            // 更新要么先于删除完成，要么因商品已删除而失败
            if let Err(err) = updated {
                assert!(matches!(err, CoreError::NotFound(_)));
            }
            assert!(matches!(
                service.get(&tenant, id).await,
                Err(CoreError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_featured_skips_off_sale_products() {
        let service = ProductService::new(DocumentStore::memory());
        let tenant = TenantId::default();

        service.create(&tenant, request("Visible")).await.unwrap();
        service
            .create(
                &tenant,
                CreateProductRequest {
                    status: Some("1".into()),
                    ..request("Hidden")
                },
            )
            .await
            .unwrap();

        let featured = service.featured(&tenant, 8).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "Visible");
    }

    #[tokio::test]
    async fn test_editor_infers_dimensions() {
        let service = ProductService::new(DocumentStore::memory());
        let tenant = TenantId::default();
        let rows = generate(
            &[
                VariantDimension::new("Color", "Red,Blue"),
                VariantDimension::new("Size", "S"),
            ],
            &[],
        )
        .unwrap();
        let product = service
            .create(
                &tenant,
                CreateProductRequest {
                    skus: Some(rows),
                    ..request("Tee")
                },
            )
            .await
            .unwrap();

        let editor = service.editor(&tenant, product.id).await.unwrap();
        assert_eq!(editor.rows.len(), 2);
        assert_eq!(
            editor.dimensions,
            vec![
                VariantDimension::new("Color", "Red,Blue"),
                VariantDimension::new("Size", "S"),
            ]
        );
    }
}
