//! 应用层：共享状态、路由与各业务模块

pub mod product;
pub mod settings;
pub mod theme;

use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{HttpConfig, ThemeConfig};
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::store::DocumentStore;
use product::service::ProductService;
use settings::{model::ShopSettings, service::SettingsService};
use theme::{select_theme_id, ResolvedTheme, ThemeError, ThemeRegistry, ThemeRenderer};

#[derive(Clone)]
pub struct AppState {
    pub settings_service: SettingsService,
    pub product_service: ProductService,
    pub renderer: Arc<ThemeRenderer>,
    pub theme_config: ThemeConfig,
}

impl AppState {
    pub fn new(theme_config: ThemeConfig, store: DocumentStore) -> Result<Self, ThemeError> {
        let registry = ThemeRegistry::new(&theme_config.default_id)?;
        let renderer = ThemeRenderer::new(registry)?;
        Ok(Self {
            settings_service: SettingsService::new(store.clone()),
            product_service: ProductService::new(store),
            renderer: Arc::new(renderer),
            theme_config,
        })
    }

    /// 按租户设置解析本次请求使用的主题
    pub fn resolve_theme(&self, settings: &ShopSettings) -> ResolvedTheme {
        let registry = self.renderer.registry();
        let theme_id = select_theme_id(
            settings.home_theme_id.as_deref(),
            self.theme_config.fallback_id.as_deref(),
            registry.default_id(),
        );
        registry.resolve_theme(&theme_id)
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/", get(theme::handler::home_page))
        .route("/health", get(health_check))
        .route("/api/common/section", get(theme::handler::common_section))
        .route("/api/themes", get(theme::handler::list_themes))
        .route(
            "/api/admin/shop/settings",
            get(settings::handler::get_settings).post(settings::handler::update_settings),
        )
        .route(
            "/api/admin/products",
            get(product::handler::list_products).post(product::handler::create_product),
        )
        .route(
            "/api/admin/products/:id",
            get(product::handler::get_product)
                .put(product::handler::update_product)
                .delete(product::handler::delete_product),
        )
        .route(
            "/api/admin/products/:id/sku-editor",
            get(product::handler::sku_editor),
        )
        .route("/api/admin/skus/generate", post(product::handler::generate_skus))
        .route("/api/admin/skus/patch", post(product::handler::patch_skus))
        .route("/api/admin/skus/row", post(product::handler::blank_sku_row))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
        .with_state(state)
}
