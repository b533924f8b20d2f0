//! 店铺设置数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

const PAYMENT_SWITCHES: [&str; 2] = ["1", "2"];
const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "CNY"];

/// 租户店铺设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// "1" 启用 / "2" 停用
    pub enable_stripe: String,
    pub enable_paypal: String,
    pub default_currency: String,
    pub default_shipping_fee: String,
    /// 未设置时按部署配置和默认主题解析
    pub home_theme_id: Option<String>,
    pub site: SiteProfile,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 站点基础信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub site_name: String,
    pub hero_text: String,
    pub about_text: String,
    pub contact_email: String,
    pub closed: bool,
    pub close_message: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            enable_stripe: "2".to_string(),
            enable_paypal: "2".to_string(),
            default_currency: "USD".to_string(),
            default_shipping_fee: "0".to_string(),
            home_theme_id: None,
            site: SiteProfile::default(),
            updated_at: None,
        }
    }
}

/// 更新店铺设置请求，所有字段可选
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateShopSettingsRequest {
    pub enable_stripe: Option<String>,
    pub enable_paypal: Option<String>,
    pub default_currency: Option<String>,
    pub default_shipping_fee: Option<String>,
    pub home_theme_id: Option<String>,

    #[validate(length(max = 100, message = "站点名称不能超过100个字符"))]
    pub site_name: Option<String>,

    #[validate(length(max = 200, message = "首屏文案不能超过200个字符"))]
    pub hero_text: Option<String>,

    #[validate(length(max = 2000, message = "关于我们不能超过2000个字符"))]
    pub about_text: Option<String>,

    #[validate(email(message = "请提供有效的邮箱地址"))]
    pub contact_email: Option<String>,

    pub site_closed: Option<bool>,

    #[validate(length(max = 500, message = "维护提示不能超过500个字符"))]
    pub close_message: Option<String>,
}

/// 设置接口的返回值
#[derive(Debug, Serialize)]
pub struct SettingsView {
    #[serde(flatten)]
    pub settings: ShopSettings,
    /// 前台实际使用的主题 id
    pub effective_theme_id: String,
}

impl ShopSettings {
    /// 稀疏更新
    ///
    /// 超出允许范围的值被忽略而不是报错，返回被忽略的字段名。
    pub fn apply<F>(&mut self, req: UpdateShopSettingsRequest, is_selectable: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> bool,
    {
        let mut ignored = Vec::new();

        if let Some(value) = req.enable_stripe {
            if PAYMENT_SWITCHES.contains(&value.trim()) {
                self.enable_stripe = value.trim().to_string();
            } else {
                ignored.push("enable_stripe");
            }
        }
        if let Some(value) = req.enable_paypal {
            if PAYMENT_SWITCHES.contains(&value.trim()) {
                self.enable_paypal = value.trim().to_string();
            } else {
                ignored.push("enable_paypal");
            }
        }
        if let Some(value) = req.default_currency {
            let currency = value.trim().to_uppercase();
            if CURRENCIES.contains(&currency.as_str()) {
                self.default_currency = currency;
            } else {
                ignored.push("default_currency");
            }
        }
        if let Some(value) = req.default_shipping_fee {
            match value.trim().parse::<f64>() {
                Ok(fee) if fee.is_finite() && fee >= 0.0 => {
                    self.default_shipping_fee = value.trim().to_string()
                }
                _ => ignored.push("default_shipping_fee"),
            }
        }
        if let Some(value) = req.home_theme_id {
            let id = value.trim();
            if is_selectable(id) {
                self.home_theme_id = Some(id.to_string());
            } else {
                ignored.push("home_theme_id");
            }
        }

        if let Some(value) = req.site_name {
            self.site.site_name = value.trim().to_string();
        }
        if let Some(value) = req.hero_text {
            self.site.hero_text = value.trim().to_string();
        }
        if let Some(value) = req.about_text {
            self.site.about_text = value.trim().to_string();
        }
        if let Some(value) = req.contact_email {
            self.site.contact_email = value.trim().to_lowercase();
        }
        if let Some(closed) = req.site_closed {
            self.site.closed = closed;
        }
        if let Some(value) = req.close_message {
            self.site.close_message = value.trim().to_string();
        }

        self.updated_at = Some(Utc::now());
        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectable(id: &str) -> bool {
        ["001", "005", "010", "011"].contains(&id)
    }

    #[test]
    fn test_apply_valid_values() {
        let mut settings = ShopSettings::default();
        let ignored = settings.apply(
            UpdateShopSettingsRequest {
                enable_stripe: Some("1".into()),
                default_currency: Some("eur".into()),
                default_shipping_fee: Some(" 4.50 ".into()),
                home_theme_id: Some("011".into()),
                site_name: Some("  Acme  ".into()),
                site_closed: Some(true),
                ..Default::default()
            },
            selectable,
        );

        assert!(ignored.is_empty());
        assert_eq!(settings.enable_stripe, "1");
        assert_eq!(settings.enable_paypal, "2");
        assert_eq!(settings.default_currency, "EUR");
        assert_eq!(settings.default_shipping_fee, "4.50");
        assert_eq!(settings.home_theme_id.as_deref(), Some("011"));
        assert_eq!(settings.site.site_name, "Acme");
        assert!(settings.site.closed);
        assert!(settings.updated_at.is_some());
    }

    #[test]
    fn test_apply_ignores_out_of_range_values() {
        let mut settings = ShopSettings::default();
        settings.home_theme_id = Some("005".into());

        let ignored = settings.apply(
            UpdateShopSettingsRequest {
                enable_paypal: Some("yes".into()),
                default_currency: Some("JPY".into()),
                default_shipping_fee: Some("-1".into()),
                home_theme_id: Some("999".into()),
                ..Default::default()
            },
            selectable,
        );

        assert_eq!(
            ignored,
            vec![
                "enable_paypal",
                "default_currency",
                "default_shipping_fee",
                "home_theme_id"
            ]
        );
        assert_eq!(settings.enable_paypal, "2");
        assert_eq!(settings.default_currency, "USD");
        assert_eq!(settings.default_shipping_fee, "0");
        assert_eq!(settings.home_theme_id.as_deref(), Some("005"));
    }

    #[test]
    fn test_request_validation() {
        let req = UpdateShopSettingsRequest {
            contact_email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateShopSettingsRequest {
            contact_email: Some("sales@example.com".into()),
            site_name: Some("Acme".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
