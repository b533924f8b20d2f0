//! 主题页面渲染
//!
//! 所有主题模板在启动时编译进同一个 Handlebars 实例，渲染时按
//! [`ResolvedTheme`] 中解析好的模板名取用。

use chrono::Datelike;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::warn;

use super::model::{template_name, ResolvedTemplate, ResolvedTheme, TemplateSlot};
use super::registry::ThemeRegistry;
use super::ThemeError;

const MAINTENANCE_TEMPLATE: &str = "maintenance";

/// 店铺基础信息（首页与维护页共用）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteProps {
    pub site_name: String,
    pub hero_text: String,
    pub about_text: String,
    pub contact_email: String,
    pub close_message: String,
}

/// 首页推荐商品
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedProduct {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub price: String,
    pub cover: String,
}

/// 首页渲染所需的全部数据
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeProps {
    pub site: SiteProps,
    pub featured: Vec<FeaturedProduct>,
    /// 站点关闭时渲染维护页
    pub closed: bool,
}

#[derive(Serialize)]
struct LayoutContext<'a> {
    theme_id: &'a str,
    font_family: &'a str,
    css_prelude: String,
    site: &'a SiteProps,
    body: String,
    year: i32,
}

pub struct ThemeRenderer {
    handlebars: Handlebars<'static>,
    registry: ThemeRegistry,
}

impl ThemeRenderer {
    pub fn new(registry: ThemeRegistry) -> Result<Self, ThemeError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        for theme in registry.themes() {
            for slot in TemplateSlot::ALL {
                if let Some(source) = theme.slot(slot) {
                    handlebars.register_template_string(&theme.template_name(slot), source)?;
                }
            }
        }
        handlebars.register_template_string(
            MAINTENANCE_TEMPLATE,
            include_str!("../../../templates/maintenance.hbs"),
        )?;

        Ok(Self {
            handlebars,
            registry,
        })
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// 渲染首页：home 槽位渲染为正文，再嵌入 layout 槽位
    pub fn render_home(&self, theme: &ResolvedTheme, props: &HomeProps) -> Result<String, ThemeError> {
        if props.closed {
            return self.render_maintenance(theme, &props.site);
        }

        let body = self.render_slot(theme.template(TemplateSlot::Home), props)?;
        let context = LayoutContext {
            theme_id: theme.theme_id,
            font_family: theme.font.css_family(),
            css_prelude: theme.css_prelude(),
            site: &props.site,
            body,
            year: chrono::Utc::now().year(),
        };
        self.render_slot(theme.template(TemplateSlot::Layout), &context)
    }

    fn render_maintenance(&self, theme: &ResolvedTheme, site: &SiteProps) -> Result<String, ThemeError> {
        let context = LayoutContext {
            theme_id: theme.theme_id,
            font_family: theme.font.css_family(),
            css_prelude: theme.css_prelude(),
            site,
            body: String::new(),
            year: chrono::Utc::now().year(),
        };
        self.render_named(MAINTENANCE_TEMPLATE, &context)
    }

    /// 渲染单个槽位，非默认主题渲染失败时改用默认主题重试一次
    fn render_slot<T: Serialize>(
        &self,
        template: &ResolvedTemplate,
        context: &T,
    ) -> Result<String, ThemeError> {
        match self.render_named(&template.template_name, context) {
            Ok(html) => Ok(html),
            Err(err) if template.theme_id != self.registry.default_id() => {
                warn!("{}，改用默认主题 {}", err, self.registry.default_id());
                let fallback = template_name(self.registry.default_id(), template.slot);
                self.render_named(&fallback, context)
            }
            Err(err) => Err(err),
        }
    }

    fn render_named<T: Serialize>(&self, name: &str, context: &T) -> Result<String, ThemeError> {
        self.handlebars
            .render(name, context)
            .map_err(|source| ThemeError::Render {
                template: name.to_string(),
                source,
            })
    }
}
