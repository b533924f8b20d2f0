//! 店铺设置处理器

use axum::{extract::State, response::Json};
use validator::Validate;

use super::model::{SettingsView, ShopSettings, UpdateShopSettingsRequest};
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse, tenant::TenantId};

fn view(state: &AppState, settings: ShopSettings) -> SettingsView {
    let effective_theme_id = state.resolve_theme(&settings).theme_id.to_string();
    SettingsView {
        settings,
        effective_theme_id,
    }
}

pub async fn get_settings(
    State(state): State<AppState>,
    tenant: TenantId,
) -> Result<Json<ApiResponse<SettingsView>>, CoreError> {
    let settings = state.settings_service.get(&tenant).await?;
    Ok(Json(ApiResponse::success(view(&state, settings))))
}

pub async fn update_settings(
    State(state): State<AppState>,
    tenant: TenantId,
    Json(payload): Json<UpdateShopSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsView>>, CoreError> {
    payload.validate()?;

    let registry = state.renderer.registry();
    let settings = state
        .settings_service
        .update(&tenant, payload, |id| registry.is_selectable(id))
        .await?;
    Ok(Json(ApiResponse::success(view(&state, settings))))
}
