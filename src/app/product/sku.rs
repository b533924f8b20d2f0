//! SKU 组合生成与批量编辑
//!
//! 后台商品编辑器中的 SKU 行都在这里处理：按维度做笛卡尔积生成行、
//! 把批量补丁合并进行、从已有行反推维度、保存前校验行集合。所有函数
//! 都是纯函数，不做任何 I/O。
//!
//! 一行 SKU 的身份由它的属性决定：属性按 key 排序后序列化为 JSON，
//! 作为 [`identity_key`]。重新生成时身份相同的行保留价格、库存、封面
//! 和状态。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;
use validator::Validate;

use super::model::Sku;

/// 维度为空时编辑器给出的默认维度
const DEFAULT_DIMENSION_KEYS: [&str; 2] = ["Color", "Size"];

/// 单次生成的行数上限
pub const MAX_COMBINATIONS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkuError {
    #[error("请先填写 SKU 维度")]
    MissingDimension,
    #[error("SKU 维度「{0}」至少需要一个取值")]
    EmptyDimensionValues(String),
    #[error("SKU 维度重复：{0}")]
    DuplicateDimensionKey(String),
    #[error("SKU 属性 Key 不能为空")]
    EmptyAttributeKey,
    #[error("SKU 属性 Key 重复：{0}")]
    DuplicateAttributeKey(String),
    #[error("SKU 组合重复：{0}")]
    DuplicateCombination(String),
    #[error("SKU 组合数量超过上限 {0}")]
    TooManyCombinations(usize),
    #[error("SKU 库存不能为负数：{0}")]
    NegativeStock(String),
}

/// SKU 状态，序列化为 "0" / "1"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuStatus {
    #[default]
    #[serde(rename = "0")]
    OnSale,
    #[serde(rename = "1")]
    OffSale,
}

impl SkuStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0" => Some(SkuStatus::OnSale),
            "1" => Some(SkuStatus::OffSale),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkuStatus::OnSale => "0",
            SkuStatus::OffSale => "1",
        }
    }
}

/// 变体维度，`values` 为逗号分隔的原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDimension {
    pub key: String,
    #[serde(default)]
    pub values: String,
}

impl VariantDimension {
    pub fn new(key: impl Into<String>, values: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: values.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl SkuAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 编辑器中的一行 SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRow {
    /// 行键：已保存的行为 SKU id，生成的行为 `gen_*`，手动添加的行为 `tmp_*`
    pub key: String,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub sku_code: Option<String>,
    #[serde(default)]
    pub attributes: Vec<SkuAttribute>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cover: String,
    #[serde(default = "default_row_status")]
    pub status: String,
}

fn default_row_status() -> String {
    SkuStatus::OnSale.as_str().to_string()
}

impl SkuRow {
    fn blank(key: String, attributes: Vec<SkuAttribute>) -> Self {
        let label = label(&normalize_attributes(&attributes));
        Self {
            key,
            id: None,
            sku_code: None,
            attributes,
            label,
            price: String::new(),
            stock: 0,
            cover: String::new(),
            status: default_row_status(),
        }
    }

    /// 已保存的 SKU 转为编辑器行
    pub fn from_sku(sku: &Sku) -> Self {
        let attributes = sku
            .attrs
            .iter()
            .map(|(k, v)| SkuAttribute::new(k.clone(), v.clone()))
            .collect();
        Self {
            key: sku.id.to_string(),
            id: Some(sku.id),
            sku_code: Some(sku.sku_code.clone()).filter(|code| !code.is_empty()),
            attributes,
            label: label(&sku.attrs),
            price: sku.price.clone(),
            stock: sku.stock,
            cover: sku.cover.clone(),
            status: sku.status.as_str().to_string(),
        }
    }

    pub fn normalized_attributes(&self) -> BTreeMap<String, String> {
        normalize_attributes(&self.attributes)
    }
}

/// 批量补丁，空字符串与缺省字段都不修改行
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SkuPatch {
    #[serde(default)]
    pub price: Option<String>,
    #[validate(range(min = 0, message = "库存不能为负数"))]
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// 保存请求中的一条 SKU
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// 按逗号拆分取值，去掉首尾空白并丢弃空值，不去重
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// 各维度取值数的乘积，溢出时返回 `None`
fn combination_count(axes: &[(String, Vec<String>)]) -> Option<usize> {
    axes.iter()
        .try_fold(1usize, |total, (_, values)| total.checked_mul(values.len()))
}

/// 按声明顺序求笛卡尔积，从一个空组合开始逐维展开
///
/// 调用方需先用 [`combination_count`] 限制结果规模。
fn cartesian(axes: &[(String, Vec<String>)]) -> Vec<Vec<SkuAttribute>> {
    axes.iter()
        .fold(vec![Vec::new()], |combos, (key, values)| {
            let mut next = Vec::with_capacity(combos.len() * values.len());
            for combo in &combos {
                for value in values {
                    let mut extended = combo.clone();
                    extended.push(SkuAttribute::new(key.clone(), value.clone()));
                    next.push(extended);
                }
            }
            next
        })
}

/// 去掉 key/value 首尾空白，丢弃空 key；重复 key 以后出现的为准
pub fn normalize_attributes(attributes: &[SkuAttribute]) -> BTreeMap<String, String> {
    attributes
        .iter()
        .filter_map(|attr| {
            let key = attr.key.trim();
            (!key.is_empty()).then(|| (key.to_string(), attr.value.trim().to_string()))
        })
        .collect()
}

/// 规范化属性的 JSON 表示，key 按字典序排列
pub fn identity_key(attributes: &BTreeMap<String, String>) -> String {
    let mut object = Map::new();
    for (key, value) in attributes {
        object.insert(key.clone(), Value::String(value.clone()));
    }
    Value::Object(object).to_string()
}

/// 展示用标签，如 `Color:Red / Size:M`
pub fn label(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// 按维度生成 SKU 行
///
/// key 为空的维度先被丢弃；剩余维度为空或某个维度没有取值时返回错误，
/// 不生成任何行；组合总数超过 [`MAX_COMBINATIONS`] 时同样拒绝。与已有行身份相同的组合沿用已有行的价格、库存、封面、
/// 状态、id、行键和编码，只刷新属性与标签。输出顺序与笛卡尔积枚举顺序
/// 一致。
pub fn generate(dimensions: &[VariantDimension], existing: &[SkuRow]) -> Result<Vec<SkuRow>, SkuError> {
    let mut axes: Vec<(String, Vec<String>)> = Vec::new();
    let mut seen = HashSet::new();
    for dimension in dimensions {
        let key = dimension.key.trim();
        if key.is_empty() {
            continue;
        }
        if !seen.insert(key.to_string()) {
            return Err(SkuError::DuplicateDimensionKey(key.to_string()));
        }
        axes.push((key.to_string(), split_values(&dimension.values)));
    }

    if axes.is_empty() {
        return Err(SkuError::MissingDimension);
    }
    if let Some((key, _)) = axes.iter().find(|(_, values)| values.is_empty()) {
        return Err(SkuError::EmptyDimensionValues(key.clone()));
    }
    match combination_count(&axes) {
        Some(count) if count <= MAX_COMBINATIONS => {}
        _ => return Err(SkuError::TooManyCombinations(MAX_COMBINATIONS)),
    }

    // 身份重复的已有行以最后一行为准
    let mut by_identity: HashMap<String, &SkuRow> = HashMap::new();
    for row in existing {
        let attrs = row.normalized_attributes();
        if attrs.is_empty() {
            continue;
        }
        by_identity.insert(identity_key(&attrs), row);
    }

    let rows = cartesian(&axes)
        .into_iter()
        .map(|attributes| {
            let normalized = normalize_attributes(&attributes);
            match by_identity.get(&identity_key(&normalized)) {
                Some(found) => SkuRow {
                    attributes,
                    label: label(&normalized),
                    ..(*found).clone()
                },
                None => SkuRow::blank(format!("gen_{}", Uuid::new_v4()), attributes),
            }
        })
        .collect();
    Ok(rows)
}

/// 把补丁合并进行
///
/// `selected_keys` 非空时只修改行键在其中的行，否则修改全部行。返回被
/// 修改的行数。
pub fn apply_patch(rows: &mut [SkuRow], patch: &SkuPatch, selected_keys: &[String]) -> usize {
    let selected: HashSet<&str> = selected_keys.iter().map(String::as_str).collect();
    let price = patch.price.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let cover = patch.cover.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let status = patch.status.as_deref().and_then(SkuStatus::parse);

    let mut patched = 0;
    for row in rows.iter_mut() {
        if !selected.is_empty() && !selected.contains(row.key.as_str()) {
            continue;
        }
        if let Some(price) = price {
            row.price = price.to_string();
        }
        if let Some(stock) = patch.stock {
            row.stock = stock;
        }
        if let Some(cover) = cover {
            row.cover = cover.to_string();
        }
        if let Some(status) = status {
            row.status = status.as_str().to_string();
        }
        patched += 1;
    }
    patched
}

/// 从已加载的行反推维度
///
/// key 按首次出现顺序，取值按首次出现顺序去重后用逗号连接。没有任何
/// 维度时返回默认的 Color、Size。
pub fn infer_dimensions(rows: &[SkuRow]) -> Vec<VariantDimension> {
    let mut dimensions: Vec<(String, Vec<String>)> = Vec::new();
    for row in rows {
        for attr in &row.attributes {
            let key = attr.key.trim();
            if key.is_empty() {
                continue;
            }
            let index = match dimensions.iter().position(|(k, _)| k == key) {
                Some(index) => index,
                None => {
                    dimensions.push((key.to_string(), Vec::new()));
                    dimensions.len() - 1
                }
            };
            let value = attr.value.trim();
            let values = &mut dimensions[index].1;
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
    }

    if dimensions.is_empty() {
        return DEFAULT_DIMENSION_KEYS
            .iter()
            .map(|key| VariantDimension::new(*key, ""))
            .collect();
    }
    dimensions
        .into_iter()
        .map(|(key, values)| VariantDimension::new(key, values.join(",")))
        .collect()
}

/// 手动添加的空白行，每个维度一个空值
pub fn new_blank_row(dimensions: &[VariantDimension]) -> SkuRow {
    let mut keys: Vec<&str> = Vec::new();
    for dimension in dimensions {
        let key = dimension.key.trim();
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    if keys.is_empty() {
        keys = DEFAULT_DIMENSION_KEYS.to_vec();
    }

    let attributes = keys.into_iter().map(|key| SkuAttribute::new(key, "")).collect();
    SkuRow::blank(format!("tmp_{}", Uuid::new_v4()), attributes)
}

/// 保存前校验
///
/// 属性全为空的行跳过；其余行不能有空 key 或重复 key，库存不能为负，
/// 且任意两行的属性组合不能相同。
pub fn validate_rows(rows: &[SkuRow]) -> Result<(), SkuError> {
    let mut combinations = HashSet::new();
    for row in rows {
        let filled = row
            .attributes
            .iter()
            .any(|attr| !attr.key.trim().is_empty() || !attr.value.trim().is_empty());
        if !filled {
            continue;
        }

        let mut keys = HashSet::new();
        for attr in &row.attributes {
            let key = attr.key.trim();
            if key.is_empty() {
                return Err(SkuError::EmptyAttributeKey);
            }
            if !keys.insert(key) {
                return Err(SkuError::DuplicateAttributeKey(key.to_string()));
            }
        }

        let normalized = row.normalized_attributes();
        if row.stock < 0 {
            return Err(SkuError::NegativeStock(label(&normalized)));
        }
        if !combinations.insert(identity_key(&normalized)) {
            return Err(SkuError::DuplicateCombination(label(&normalized)));
        }
    }
    Ok(())
}

/// 转为保存请求，属性为空的行不提交
pub fn to_payload(rows: &[SkuRow]) -> Vec<SkuPayload> {
    rows.iter()
        .filter_map(|row| {
            let attrs = row.normalized_attributes();
            if attrs.is_empty() {
                return None;
            }
            Some(SkuPayload {
                id: row.id,
                sku_code: row.sku_code.clone(),
                attrs,
                price: Some(row.price.trim().to_string()),
                stock: Some(row.stock),
                cover: Some(row.cover.trim().to_string()),
                status: Some(row.status.clone()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_size() -> Vec<VariantDimension> {
        vec![
            VariantDimension::new("Color", "Red, Blue"),
            VariantDimension::new("Size", "S,M"),
        ]
    }

    fn attr_pairs(row: &SkuRow) -> Vec<(String, String)> {
        row.attributes
            .iter()
            .map(|a| (a.key.clone(), a.value.clone()))
            .collect()
    }

    #[test]
    fn test_split_values_trims_and_drops_empty() {
        assert_eq!(split_values(" Red, ,Blue,,Red "), vec!["Red", "Blue", "Red"]);
        assert!(split_values(" , ").is_empty());
    }

    #[test]
    fn test_generate_enumerates_in_declaration_order() {
        let rows = generate(&color_size(), &[]).unwrap();
        assert_eq!(rows.len(), 4);

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Color:Red / Size:S",
                "Color:Red / Size:M",
                "Color:Blue / Size:S",
                "Color:Blue / Size:M",
            ]
        );
        assert_eq!(
            attr_pairs(&rows[1]),
            vec![("Color".into(), "Red".into()), ("Size".into(), "M".into())]
        );
        for row in &rows {
            assert!(row.key.starts_with("gen_"));
            assert_eq!(row.id, None);
            assert_eq!(row.price, "");
            assert_eq!(row.stock, 0);
            assert_eq!(row.cover, "");
            assert_eq!(row.status, "0");
        }
    }

    #[test]
    fn test_generate_row_count_is_product_of_value_counts() {
        let dimensions = vec![
            VariantDimension::new("Color", "Red,Blue,Green"),
            VariantDimension::new("", "ignored"),
            VariantDimension::new("Size", "S,M"),
            VariantDimension::new("Material", "Cotton"),
        ];
        let rows = generate(&dimensions, &[]).unwrap();
        assert_eq!(rows.len(), 3 * 2);

        for row in &rows {
            let keys: Vec<String> = row.normalized_attributes().into_keys().collect();
            assert_eq!(keys, vec!["Color", "Material", "Size"]);
        }
    }

    #[test]
    fn test_generate_validation_errors() {
        assert_eq!(generate(&[], &[]), Err(SkuError::MissingDimension));
        assert_eq!(
            generate(&[VariantDimension::new("  ", "Red")], &[]),
            Err(SkuError::MissingDimension)
        );
        assert_eq!(
            generate(
                &[
                    VariantDimension::new("Color", "Red"),
                    VariantDimension::new("Size", " , "),
                ],
                &[]
            ),
            Err(SkuError::EmptyDimensionValues("Size".into()))
        );
        assert_eq!(
            generate(
                &[
                    VariantDimension::new("Color", "Red"),
                    VariantDimension::new(" Color ", "Blue"),
                ],
                &[]
            ),
            Err(SkuError::DuplicateDimensionKey("Color".into()))
        );
        assert_eq!(SkuError::MissingDimension.to_string(), "请先填写 SKU 维度");
    }

    #[test]
    fn test_regenerate_preserves_edited_rows() {
        let mut rows = generate(&color_size(), &[]).unwrap();
        rows[0].price = "19.90".into();
        rows[0].stock = 7;
        rows[0].cover = "/img/red-s.png".into();
        rows[0].status = "1".into();
        rows[0].sku_code = Some("RS-01".into());
        let first_key = rows[0].key.clone();

        let again = generate(&color_size(), &rows).unwrap();
        assert_eq!(again, rows);
        assert_eq!(again[0].key, first_key);
        assert_eq!(again[0].price, "19.90");
        assert_eq!(again[0].stock, 7);
        assert_eq!(again[0].cover, "/img/red-s.png");
        assert_eq!(again[0].status, "1");
        assert_eq!(again[0].sku_code.as_deref(), Some("RS-01"));
    }

    #[test]
    fn test_generate_matches_regardless_of_attribute_order() {
        let existing = SkuRow {
            price: "5".into(),
            ..SkuRow::blank(
                "saved".into(),
                vec![SkuAttribute::new("Size", " S "), SkuAttribute::new("Color", "Red")],
            )
        };
        let rows = generate(&color_size(), &[existing]).unwrap();

        assert_eq!(rows[0].key, "saved");
        assert_eq!(rows[0].price, "5");
        assert_eq!(
            attr_pairs(&rows[0]),
            vec![("Color".into(), "Red".into()), ("Size".into(), "S".into())]
        );
        assert!(rows[1..].iter().all(|r| r.key.starts_with("gen_")));
    }

    #[test]
    fn test_generate_drops_rows_for_removed_values() {
        let rows = generate(&color_size(), &[]).unwrap();
        let narrowed = vec![
            VariantDimension::new("Color", "Blue"),
            VariantDimension::new("Size", "S,M"),
        ];
        let again = generate(&narrowed, &rows).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].key, rows[2].key);
        assert_eq!(again[1].key, rows[3].key);
    }

    #[test]
    fn test_empty_attribute_rows_are_never_matched() {
        let blank = SkuRow {
            price: "99".into(),
            ..SkuRow::blank("tmp_1".into(), vec![SkuAttribute::new("", "Red")])
        };
        let rows = generate(&[VariantDimension::new("Color", "Red")], &[blank]).unwrap();
        assert_eq!(rows[0].price, "");
        assert!(rows[0].key.starts_with("gen_"));
    }

    #[test]
    fn test_generate_rejects_too_many_combinations() {
        let values = |n: usize| (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(",");

        let at_limit = vec![
            VariantDimension::new("A", values(100)),
            VariantDimension::new("B", values(100)),
        ];
        assert_eq!(generate(&at_limit, &[]).unwrap().len(), MAX_COMBINATIONS);

        let over_limit = vec![
            VariantDimension::new("A", values(100)),
            VariantDimension::new("B", values(101)),
        ];
        assert_eq!(
            generate(&over_limit, &[]),
            Err(SkuError::TooManyCombinations(MAX_COMBINATIONS))
        );
    }

    #[test]
    fn test_generate_rejects_overflowing_combination_count() {
        let huge = vec!["a"; 300_000].join(",");
        let dimensions: Vec<VariantDimension> = ["A", "B", "C", "D"]
            .iter()
            .map(|key| VariantDimension::new(*key, huge.clone()))
            .collect();

        assert_eq!(combination_count(&[("A".into(), vec![String::new(); 2])]), Some(2));
        assert_eq!(
            generate(&dimensions, &[]),
            Err(SkuError::TooManyCombinations(MAX_COMBINATIONS))
        );
    }

    #[test]
    fn test_generate_uses_last_of_duplicate_existing_rows() {
        let first = SkuRow {
            price: "1".into(),
            ..SkuRow::blank("first".into(), vec![SkuAttribute::new("Color", "Red")])
        };
        let last = SkuRow {
            price: "2".into(),
            ..SkuRow::blank("last".into(), vec![SkuAttribute::new("Color", " Red")])
        };

        let rows = generate(&[VariantDimension::new("Color", "Red")], &[first, last]).unwrap();
        assert_eq!(rows[0].key, "last");
        assert_eq!(rows[0].price, "2");
    }

    #[test]
    fn test_patch_rejects_negative_stock() {
        let patch = SkuPatch {
            stock: Some(-1),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = SkuPatch {
            stock: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_identity_key_is_sorted_json() {
        let attrs = normalize_attributes(&[
            SkuAttribute::new("Size", "M"),
            SkuAttribute::new(" Color ", " Red "),
        ]);
        assert_eq!(identity_key(&attrs), r#"{"Color":"Red","Size":"M"}"#);
    }

    #[test]
    fn test_apply_patch_all_or_selected() {
        let mut rows = vec![
            SkuRow::blank("k1".into(), vec![SkuAttribute::new("Color", "Red")]),
            SkuRow::blank("k2".into(), vec![SkuAttribute::new("Color", "Blue")]),
        ];
        let patch = SkuPatch {
            price: Some("10".into()),
            ..Default::default()
        };

        assert_eq!(apply_patch(&mut rows, &patch, &[]), 2);
        assert!(rows.iter().all(|r| r.price == "10"));

        let patch = SkuPatch {
            price: Some("12".into()),
            stock: Some(3),
            ..Default::default()
        };
        assert_eq!(apply_patch(&mut rows, &patch, &["k1".to_string()]), 1);
        assert_eq!(rows[0].price, "12");
        assert_eq!(rows[0].stock, 3);
        assert_eq!(rows[1].price, "10");
        assert_eq!(rows[1].stock, 0);
    }

    #[test]
    fn test_apply_patch_ignores_empty_fields() {
        let mut rows = vec![SkuRow {
            price: "8".into(),
            cover: "/a.png".into(),
            ..SkuRow::blank("k1".into(), vec![SkuAttribute::new("Color", "Red")])
        }];
        let patch = SkuPatch {
            price: Some("  ".into()),
            cover: Some(String::new()),
            status: Some("on".into()),
            stock: None,
        };
        apply_patch(&mut rows, &patch, &[]);
        assert_eq!(rows[0].price, "8");
        assert_eq!(rows[0].cover, "/a.png");
        assert_eq!(rows[0].status, "0");

        let patch = SkuPatch {
            status: Some("1".into()),
            ..Default::default()
        };
        apply_patch(&mut rows, &patch, &[]);
        assert_eq!(rows[0].status, "1");
    }

    #[test]
    fn test_infer_dimensions() {
        let rows = generate(&color_size(), &[]).unwrap();
        assert_eq!(
            infer_dimensions(&rows),
            vec![
                VariantDimension::new("Color", "Red,Blue"),
                VariantDimension::new("Size", "S,M"),
            ]
        );

        assert_eq!(
            infer_dimensions(&[]),
            vec![
                VariantDimension::new("Color", ""),
                VariantDimension::new("Size", ""),
            ]
        );
    }

    #[test]
    fn test_new_blank_row() {
        let row = new_blank_row(&[VariantDimension::new("Material", "Cotton")]);
        assert!(row.key.starts_with("tmp_"));
        assert_eq!(attr_pairs(&row), vec![("Material".into(), String::new())]);

        let row = new_blank_row(&[]);
        let keys: Vec<&str> = row.attributes.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["Color", "Size"]);
    }

    #[test]
    fn test_validate_rows() {
        let ok = generate(&color_size(), &[]).unwrap();
        assert_eq!(validate_rows(&ok), Ok(()));

        let blank = new_blank_row(&[]);
        assert_eq!(validate_rows(&[blank]), Ok(()));

        let empty_key = SkuRow::blank(
            "a".into(),
            vec![SkuAttribute::new("Color", "Red"), SkuAttribute::new(" ", "M")],
        );
        assert_eq!(validate_rows(&[empty_key]), Err(SkuError::EmptyAttributeKey));

        let dup_key = SkuRow::blank(
            "b".into(),
            vec![SkuAttribute::new("Color", "Red"), SkuAttribute::new("Color ", "Blue")],
        );
        assert_eq!(
            validate_rows(&[dup_key]),
            Err(SkuError::DuplicateAttributeKey("Color".into()))
        );

        let negative = SkuRow {
            stock: -3,
            ..SkuRow::blank("c".into(), vec![SkuAttribute::new("Color", "Red")])
        };
        assert_eq!(
            validate_rows(&[negative]),
            Err(SkuError::NegativeStock("Color:Red".into()))
        );

        let dup_combo = generate(&[VariantDimension::new("Color", "Red,Red")], &[]).unwrap();
        assert_eq!(
            validate_rows(&dup_combo),
            Err(SkuError::DuplicateCombination("Color:Red".into()))
        );
    }

    #[test]
    fn test_to_payload_skips_empty_rows() {
        let mut rows = generate(&[VariantDimension::new("Color", "Red")], &[]).unwrap();
        rows[0].price = " 9.5 ".into();
        rows.push(SkuRow::blank("tmp_empty".into(), Vec::new()));
        rows.push(SkuRow::blank("tmp_nokey".into(), vec![SkuAttribute::new(" ", "x")]));
        rows.push(new_blank_row(&[]));

        let payload = to_payload(&rows);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[1].attrs.len(), 2);
        assert_eq!(payload[0].id, None);
        assert_eq!(payload[0].attrs.get("Color").map(String::as_str), Some("Red"));
        assert_eq!(payload[0].price.as_deref(), Some("9.5"));
        assert_eq!(payload[0].status.as_deref(), Some("0"));
    }
}
