//! 商品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;
use validator::Validate;

use super::sku::{self, SkuError, SkuPayload, SkuRow, SkuStatus, VariantDimension};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: Uuid,
    #[serde(default)]
    pub sku_code: String,
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub status: SkuStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub price: String,
    /// "1" 跟踪库存 / "2" 不跟踪
    #[serde(default = "default_track_stock")]
    pub track_stock: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cover: String,
    /// "0" 上架 / "1" 下架
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub skus: Vec<Sku>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_track_stock() -> String {
    "2".to_string()
}

/// 商品详情，附带编辑器所需的 SKU 行
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub sku_rows: Vec<SkuRow>,
}

/// SKU 编辑器初始数据
#[derive(Debug, Serialize)]
pub struct SkuEditor {
    pub product_id: Uuid,
    pub rows: Vec<SkuRow>,
    pub dimensions: Vec<VariantDimension>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "商品标题长度必须在1-200个字符之间"))]
    pub title: String,

    #[validate(length(max = 500, message = "商品简介不能超过500个字符"))]
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub track_stock: Option<String>,

    #[validate(range(min = 0, message = "库存不能为负数"))]
    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub status: Option<String>,

    /// 编辑器中的完整行集合，保存前统一校验
    #[serde(default)]
    pub skus: Option<Vec<SkuRow>>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "商品标题长度必须在1-200个字符之间"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "商品简介不能超过500个字符"))]
    pub summary: Option<String>,

    pub price: Option<String>,
    pub track_stock: Option<String>,

    #[validate(range(min = 0, message = "库存不能为负数"))]
    pub stock: Option<i64>,

    pub cover: Option<String>,
    pub status: Option<String>,

    /// 省略时保留原 SKU 集合，提供时整体替换
    pub skus: Option<Vec<SkuRow>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub keyword: Option<String>,
}

fn track_stock_value(value: &str) -> Option<&'static str> {
    match value.trim() {
        "1" => Some("1"),
        "2" => Some("2"),
        _ => None,
    }
}

impl Product {
    pub fn new(req: CreateProductRequest) -> Result<Self, SkuError> {
        let now = Utc::now();
        let mut product = Product {
            id: Uuid::new_v4(),
            title: req.title.trim().to_string(),
            summary: req.summary.trim().to_string(),
            price: req.price.trim().to_string(),
            track_stock: req
                .track_stock
                .as_deref()
                .and_then(track_stock_value)
                .unwrap_or("2")
                .to_string(),
            stock: req.stock,
            cover: req.cover.trim().to_string(),
            status: req
                .status
                .as_deref()
                .and_then(SkuStatus::parse)
                .unwrap_or_default()
                .as_str()
                .to_string(),
            skus: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        if let Some(rows) = req.skus {
            sku::validate_rows(&rows)?;
            product.sync_skus(sku::to_payload(&rows));
        }
        Ok(product)
    }

    pub fn apply_update(&mut self, req: UpdateProductRequest) -> Result<(), SkuError> {
        if let Some(rows) = &req.skus {
            sku::validate_rows(rows)?;
        }

        if let Some(title) = req.title {
            self.title = title.trim().to_string();
        }
        if let Some(summary) = req.summary {
            self.summary = summary.trim().to_string();
        }
        if let Some(price) = req.price {
            self.price = price.trim().to_string();
        }
        if let Some(track) = req.track_stock.as_deref().and_then(track_stock_value) {
            self.track_stock = track.to_string();
        }
        if let Some(stock) = req.stock {
            self.stock = stock;
        }
        if let Some(cover) = req.cover {
            self.cover = cover.trim().to_string();
        }
        if let Some(status) = req.status.as_deref().and_then(SkuStatus::parse) {
            self.status = status.as_str().to_string();
        }
        if let Some(rows) = req.skus {
            self.sync_skus(sku::to_payload(&rows));
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// 用保存请求整体替换 SKU 集合
    ///
    /// 带已知 id 的条目更新对应 SKU，其余条目新建；请求中没有出现的
    /// SKU 被删除。结果顺序与请求顺序一致。
    pub fn sync_skus(&mut self, payload: Vec<SkuPayload>) {
        let mut existing: HashMap<Uuid, Sku> = self.skus.drain(..).map(|s| (s.id, s)).collect();

        self.skus = payload
            .into_iter()
            .map(|item| {
                let current = item.id.and_then(|id| existing.remove(&id));
                let mut sku = current.unwrap_or_else(|| Sku {
                    id: Uuid::new_v4(),
                    sku_code: String::new(),
                    attrs: BTreeMap::new(),
                    price: String::new(),
                    stock: 0,
                    cover: String::new(),
                    status: SkuStatus::OnSale,
                });

                if let Some(code) = item.sku_code {
                    sku.sku_code = code.trim().to_string();
                }
                sku.attrs = item.attrs;
                if let Some(price) = item.price {
                    sku.price = price;
                }
                if let Some(stock) = item.stock {
                    sku.stock = stock;
                }
                if let Some(cover) = item.cover {
                    sku.cover = cover;
                }
                if let Some(status) = item.status.as_deref().and_then(SkuStatus::parse) {
                    sku.status = status;
                }
                sku
            })
            .collect();
    }

    pub fn sku_rows(&self) -> Vec<SkuRow> {
        self.skus.iter().map(SkuRow::from_sku).collect()
    }

    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        keyword.is_empty()
            || self.title.to_lowercase().contains(&keyword)
            || self.summary.to_lowercase().contains(&keyword)
    }

    pub fn is_on_sale(&self) -> bool {
        self.status == SkuStatus::OnSale.as_str()
    }
}
