//! 主题模块：静态注册表、按租户解析与页面渲染

pub mod handler;
pub mod model;
pub mod registry;
pub mod render;

pub use model::{ResolvedTheme, TemplateSlot};
pub use registry::{select_theme_id, ThemeRegistry, DEFAULT_THEME_ID};
pub use render::{HomeProps, ThemeRenderer};

/// 主题错误类型
///
/// 查找失败不会出现在这里（总是回退到默认主题），这里只有启动期的
/// 注册表错误和渲染错误。
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("默认主题 {0} 未注册")]
    UnknownDefault(String),
    #[error("默认主题 {theme_id} 缺少 {slot} 模板")]
    IncompleteDefault {
        theme_id: String,
        slot: TemplateSlot,
    },
    #[error("模板编译失败: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("模板 {template} 渲染失败: {source}")]
    Render {
        template: String,
        #[source]
        source: handlebars::RenderError,
    },
}
