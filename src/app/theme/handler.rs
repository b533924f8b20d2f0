//! 主题处理器

use axum::{extract::State, response::Html, response::Json};
use serde::Serialize;

use super::model::{FontFamily, ThemeSummary};
use super::render::{FeaturedProduct, HomeProps, SiteProps};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    response::{ApiResponse, ListData},
    tenant::TenantId,
};

const FEATURED_LIMIT: usize = 8;

/// 前台公共区块：当前租户的主题信息
#[derive(Debug, Serialize)]
pub struct CommonSection {
    pub home_theme_id: String,
    pub resolved_theme_id: &'static str,
    pub font: FontFamily,
    pub font_family: &'static str,
    pub css_prelude: String,
    pub site_name: String,
    pub closed: bool,
}

/// 首页，按租户主题渲染
pub async fn home_page(
    State(state): State<AppState>,
    tenant: TenantId,
) -> Result<Html<String>, CoreError> {
    let settings = state.settings_service.get(&tenant).await?;
    let theme = state.resolve_theme(&settings);

    let featured = state
        .product_service
        .featured(&tenant, FEATURED_LIMIT)
        .await?
        .into_iter()
        .map(|p| FeaturedProduct {
            id: p.id.to_string(),
            title: p.title,
            summary: p.summary,
            price: p.price,
            cover: p.cover,
        })
        .collect();

    let site = &settings.site;
    let props = HomeProps {
        site: SiteProps {
            site_name: site.site_name.clone(),
            hero_text: site.hero_text.clone(),
            about_text: site.about_text.clone(),
            contact_email: site.contact_email.clone(),
            close_message: site.close_message.clone(),
        },
        featured,
        closed: site.closed,
    };

    let html = state.renderer.render_home(&theme, &props)?;
    Ok(Html(html))
}

pub async fn common_section(
    State(state): State<AppState>,
    tenant: TenantId,
) -> Result<Json<ApiResponse<CommonSection>>, CoreError> {
    let settings = state.settings_service.get(&tenant).await?;
    let theme = state.resolve_theme(&settings);

    Ok(Json(ApiResponse::success(CommonSection {
        css_prelude: theme.css_prelude(),
        home_theme_id: theme.requested_id,
        resolved_theme_id: theme.theme_id,
        font: theme.font,
        font_family: theme.font.css_family(),
        site_name: settings.site.site_name,
        closed: settings.site.closed,
    })))
}

pub async fn list_themes(State(state): State<AppState>) -> Json<ApiResponse<ListData<ThemeSummary>>> {
    let themes = state
        .renderer
        .registry()
        .themes()
        .map(ThemeSummary::from)
        .collect();
    Json(ApiResponse::list(themes))
}
