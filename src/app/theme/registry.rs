//! 静态主题注册表
//!
//! 主题 id 到模板的映射在编译期固定，解析只做表查找，缺失时回退到默认主题。

use tracing::{debug, warn};

use super::model::{
    FontFamily, ResolveMiss, ResolvedTemplate, ResolvedTheme, TemplateSlot, ThemeDefinition,
};
use super::ThemeError;

pub const DEFAULT_THEME_ID: &str = "010";

static THEMES: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "001",
        name: "主题 001 · Modern B2B",
        description: "干净、偏B2B展示风格，适合企业与品牌站。",
        preview: "/themes/hero-001.svg",
        font: FontFamily::Lato,
        selectable: true,
        layout: None,
        home: Some(include_str!("../../../templates/themes/001/home.hbs")),
    },
    ThemeDefinition {
        id: "005",
        name: "主题 005 · Commerce Dark",
        description: "电商导向，强CTA与暗色氛围，适合SKU较多。",
        preview: "/themes/hero-005.svg",
        font: FontFamily::OpenSans,
        selectable: true,
        layout: Some(include_str!("../../../templates/themes/005/layout.hbs")),
        home: Some(include_str!("../../../templates/themes/005/home.hbs")),
    },
    ThemeDefinition {
        id: "010",
        name: "独立站·通用（推荐）",
        description: "通用型营销首页，适合大多数品类。",
        preview: "/themes/hero-010.svg",
        font: FontFamily::OpenSans,
        selectable: true,
        layout: Some(include_str!("../../../templates/themes/010/layout.hbs")),
        home: Some(include_str!("../../../templates/themes/010/home.hbs")),
    },
    ThemeDefinition {
        id: "011",
        name: "主题 011 · Premium",
        description: "更强品牌质感与留白，适合中高客单。",
        preview: "/themes/hero-011.svg",
        font: FontFamily::OpenSans,
        selectable: true,
        layout: Some(include_str!("../../../templates/themes/011/layout.hbs")),
        home: Some(include_str!("../../../templates/themes/011/home.hbs")),
    },
];

/// 主题注册表
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: &'static [ThemeDefinition],
    default: &'static ThemeDefinition,
}

impl ThemeRegistry {
    /// 使用内置主题创建注册表
    ///
    /// 默认主题必须已注册且提供全部槽位，这样回退查找总能成功。
    pub fn new(default_id: &str) -> Result<Self, ThemeError> {
        Self::with_themes(THEMES, default_id)
    }

    fn with_themes(
        themes: &'static [ThemeDefinition],
        default_id: &str,
    ) -> Result<Self, ThemeError> {
        let default = themes
            .iter()
            .find(|t| t.id == default_id)
            .ok_or_else(|| ThemeError::UnknownDefault(default_id.to_string()))?;

        if let Some(slot) = TemplateSlot::ALL
            .into_iter()
            .find(|slot| default.slot(*slot).is_none())
        {
            return Err(ThemeError::IncompleteDefault {
                theme_id: default_id.to_string(),
                slot,
            });
        }

        Ok(Self { themes, default })
    }

    pub fn default_theme(&self) -> &'static ThemeDefinition {
        self.default
    }

    pub fn default_id(&self) -> &'static str {
        self.default.id
    }

    pub fn get(&self, id: &str) -> Option<&'static ThemeDefinition> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn themes(&self) -> impl Iterator<Item = &'static ThemeDefinition> {
        self.themes.iter()
    }

    /// 管理员是否可以将租户主题切换为该 id
    pub fn is_selectable(&self, id: &str) -> bool {
        self.get(id).map(|t| t.selectable).unwrap_or(false)
    }

    /// 解析单个槽位
    ///
    /// 请求的主题未注册或缺少该槽位时，静默回退到默认主题的同名槽位。
    pub fn resolve(&self, template_id: &str, slot: TemplateSlot) -> ResolvedTemplate {
        let template_id = template_id.trim();
        let miss = match self.get(template_id) {
            Some(theme) if theme.slot(slot).is_some() => {
                return ResolvedTemplate {
                    theme_id: theme.id,
                    slot,
                    template_name: theme.template_name(slot),
                    fallback: None,
                };
            }
            Some(_) => ResolveMiss::MissingSlot,
            None => ResolveMiss::UnknownTheme,
        };

        match miss {
            // 主题只覆盖部分槽位是正常配置
            ResolveMiss::MissingSlot => debug!(
                "主题 {} 未提供 {} 模板，使用默认主题 {}",
                template_id, slot, self.default.id
            ),
            ResolveMiss::UnknownTheme => warn!(
                "主题 {} 未注册，{} 模板回退到默认主题 {}",
                template_id, slot, self.default.id
            ),
        }

        ResolvedTemplate {
            theme_id: self.default.id,
            slot,
            template_name: self.default.template_name(slot),
            fallback: Some(miss),
        }
    }

    /// 解析一次请求所需的全部槽位
    pub fn resolve_theme(&self, template_id: &str) -> ResolvedTheme {
        let theme = self.get(template_id.trim()).unwrap_or(self.default);
        ResolvedTheme {
            requested_id: template_id.trim().to_string(),
            theme_id: theme.id,
            font: theme.font,
            layout: self.resolve(template_id, TemplateSlot::Layout),
            home: self.resolve(template_id, TemplateSlot::Home),
        }
    }
}

/// 确定租户使用的主题 id
///
/// 顺序：租户设置 → 部署级配置 → 默认主题。空白值视为未设置。
pub fn select_theme_id(
    tenant_setting: Option<&str>,
    configured_fallback: Option<&str>,
    default_id: &str,
) -> String {
    [tenant_setting, configured_fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .unwrap_or(default_id)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new(DEFAULT_THEME_ID).unwrap()
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let resolved = registry().resolve("999", TemplateSlot::Home);
        assert_eq!(resolved.theme_id, "010");
        assert_eq!(resolved.template_name, "010/home");
        assert_eq!(resolved.fallback, Some(ResolveMiss::UnknownTheme));
    }

    #[test]
    fn test_known_theme_resolves_itself() {
        let resolved = registry().resolve("005", TemplateSlot::Layout);
        assert_eq!(resolved.theme_id, "005");
        assert_eq!(resolved.fallback, None);
    }

    #[test]
    fn test_missing_slot_uses_default_slot() {
        let registry = registry();
        let theme = registry.resolve_theme("001");
        assert_eq!(theme.theme_id, "001");
        assert_eq!(theme.font, FontFamily::Lato);
        assert_eq!(theme.home.theme_id, "001");
        assert_eq!(theme.layout.theme_id, "010");
        assert_eq!(theme.layout.fallback, Some(ResolveMiss::MissingSlot));
    }

    #[test]
    fn test_resolve_theme_for_unknown_id_keeps_requested() {
        let theme = registry().resolve_theme(" 042 ");
        assert_eq!(theme.requested_id, "042");
        assert_eq!(theme.theme_id, "010");
        assert!(theme.css_prelude().contains("--main-color-normal-010"));
    }

    #[test]
    fn test_default_must_be_registered_and_complete() {
        assert!(matches!(
            ThemeRegistry::new("999"),
            Err(ThemeError::UnknownDefault(_))
        ));
        assert!(matches!(
            ThemeRegistry::new("001"),
            Err(ThemeError::IncompleteDefault {
                slot: TemplateSlot::Layout,
                ..
            })
        ));
    }

    #[test]
    fn test_selectable_themes() {
        let registry = registry();
        for id in ["001", "005", "010", "011"] {
            assert!(registry.is_selectable(id), "{} should be selectable", id);
        }
        assert!(!registry.is_selectable("002"));
    }

    #[test]
    fn test_select_theme_id_order() {
        assert_eq!(select_theme_id(Some("005"), Some("011"), "010"), "005");
        assert_eq!(select_theme_id(Some("  "), Some("011"), "010"), "011");
        assert_eq!(select_theme_id(None, None, "010"), "010");
        assert_eq!(select_theme_id(None, Some(""), "010"), "010");
    }
}
