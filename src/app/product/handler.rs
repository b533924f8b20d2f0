//! 商品与 SKU 编辑处理器

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::model::{
    CreateProductRequest, Product, ProductDetail, ProductQuery, SkuEditor, UpdateProductRequest,
};
use super::sku::{self, SkuPatch, SkuRow, VariantDimension};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    response::{ApiResponse, ListData},
    tenant::TenantId,
};

#[derive(Debug, Deserialize)]
pub struct GenerateSkusRequest {
    pub dimensions: Vec<VariantDimension>,
    #[serde(default)]
    pub rows: Vec<SkuRow>,
}

#[derive(Debug, Deserialize)]
pub struct PatchSkusRequest {
    pub rows: Vec<SkuRow>,
    pub patch: SkuPatch,
    #[serde(default)]
    pub selected_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PatchSkusResponse {
    pub patched: usize,
    pub rows: Vec<SkuRow>,
}

#[derive(Debug, Deserialize)]
pub struct BlankRowRequest {
    #[serde(default)]
    pub dimensions: Vec<VariantDimension>,
}

pub async fn list_products(
    State(state): State<AppState>,
    tenant: TenantId,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<ListData<Product>>>, CoreError> {
    let products = state
        .product_service
        .list(&tenant, query.keyword.as_deref())
        .await?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    payload.validate()?;
    let product = state.product_service.create(&tenant, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductDetail>>, CoreError> {
    let product = state.product_service.get(&tenant, id).await?;
    let sku_rows = product.sku_rows();
    Ok(Json(ApiResponse::success(ProductDetail { product, sku_rows })))
}

pub async fn update_product(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    payload.validate()?;
    let product = state.product_service.update(&tenant, id, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, CoreError> {
    state.product_service.delete(&tenant, id).await?;
    Ok(Json(ApiResponse::success(id)))
}

pub async fn sku_editor(
    State(state): State<AppState>,
    tenant: TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SkuEditor>>, CoreError> {
    let editor = state.product_service.editor(&tenant, id).await?;
    Ok(Json(ApiResponse::success(editor)))
}

pub async fn generate_skus(
    Json(payload): Json<GenerateSkusRequest>,
) -> Result<Json<ApiResponse<Vec<SkuRow>>>, CoreError> {
    let rows = sku::generate(&payload.dimensions, &payload.rows)?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn patch_skus(
    Json(payload): Json<PatchSkusRequest>,
) -> Result<Json<ApiResponse<PatchSkusResponse>>, CoreError> {
    payload.patch.validate()?;

    let mut rows = payload.rows;
    let patched = sku::apply_patch(&mut rows, &payload.patch, &payload.selected_keys);
    Ok(Json(ApiResponse::success(PatchSkusResponse { patched, rows })))
}

pub async fn blank_sku_row(Json(payload): Json<BlankRowRequest>) -> Json<ApiResponse<SkuRow>> {
    Json(ApiResponse::success(sku::new_blank_row(&payload.dimensions)))
}
