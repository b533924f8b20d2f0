//! 主题数据模型

use serde::Serialize;
use std::fmt;

/// 主题中的模板槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSlot {
    /// 页面外壳：导航、页脚、主题变量
    Layout,
    /// 首页主体
    Home,
}

impl TemplateSlot {
    pub const ALL: [TemplateSlot; 2] = [TemplateSlot::Layout, TemplateSlot::Home];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSlot::Layout => "layout",
            TemplateSlot::Home => "home",
        }
    }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Lato,
    OpenSans,
}

impl FontFamily {
    pub fn css_family(&self) -> &'static str {
        match self {
            FontFamily::Lato => "'Lato', sans-serif",
            FontFamily::OpenSans => "'Open Sans', sans-serif",
        }
    }
}

/// 静态注册的主题定义
#[derive(Debug)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
    pub font: FontFamily,
    /// 是否允许管理员在后台选择
    pub selectable: bool,
    pub layout: Option<&'static str>,
    pub home: Option<&'static str>,
}

impl ThemeDefinition {
    pub fn slot(&self, slot: TemplateSlot) -> Option<&'static str> {
        match slot {
            TemplateSlot::Layout => self.layout,
            TemplateSlot::Home => self.home,
        }
    }

    pub fn slots(&self) -> Vec<TemplateSlot> {
        TemplateSlot::ALL
            .into_iter()
            .filter(|slot| self.slot(*slot).is_some())
            .collect()
    }

    /// 模板在 Handlebars 注册表中的名称
    pub fn template_name(&self, slot: TemplateSlot) -> String {
        template_name(self.id, slot)
    }
}

pub fn template_name(theme_id: &str, slot: TemplateSlot) -> String {
    format!("{}/{}", theme_id, slot)
}

/// 主题列表接口的返回项
#[derive(Debug, Serialize)]
pub struct ThemeSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
    pub font: FontFamily,
    pub selectable: bool,
    pub slots: Vec<TemplateSlot>,
}

impl From<&ThemeDefinition> for ThemeSummary {
    fn from(theme: &ThemeDefinition) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            description: theme.description,
            preview: theme.preview,
            font: theme.font,
            selectable: theme.selectable,
            slots: theme.slots(),
        }
    }
}

/// 查找请求的模板失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMiss {
    /// 注册表中没有该主题
    UnknownTheme,
    /// 主题存在但未提供该槽位
    MissingSlot,
}

impl fmt::Display for ResolveMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMiss::UnknownTheme => f.write_str("未注册的主题"),
            ResolveMiss::MissingSlot => f.write_str("主题缺少该模板"),
        }
    }
}

/// 单个槽位的解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTemplate {
    /// 实际提供模板的主题
    pub theme_id: &'static str,
    pub slot: TemplateSlot,
    pub template_name: String,
    /// 发生回退时记录原因
    pub fallback: Option<ResolveMiss>,
}

/// 一次请求使用的完整主题，解析后显式传给渲染层
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTheme {
    /// 租户配置（或兜底链）给出的主题 id
    pub requested_id: String,
    /// 请求的主题未注册时为默认主题 id
    pub theme_id: &'static str,
    pub font: FontFamily,
    pub layout: ResolvedTemplate,
    pub home: ResolvedTemplate,
}

impl ResolvedTheme {
    /// 主题色 CSS 变量前导样式
    pub fn css_prelude(&self) -> String {
        let id = &self.theme_id;
        format!(
            ":root {{ --main-color-light: var(--main-color-light-{id}); \
             --main-color-normal: var(--main-color-normal-{id}); \
             --main-color-deep: var(--main-color-deep-{id}); }}"
        )
    }

    pub fn template(&self, slot: TemplateSlot) -> &ResolvedTemplate {
        match slot {
            TemplateSlot::Layout => &self.layout,
            TemplateSlot::Home => &self.home,
        }
    }
}
