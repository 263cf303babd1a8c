//! 原始声明（JSON节点）的字段访问
//!
//! 同时兼容两种清单方言：
//! - Presentation 2：`@id`、`@type: "sc:Range"`、`members`、`ranges`
//! - Presentation 3：`id`、`type: "Range"`、`items`

use serde_json::Value;

/// 标识符字段
const ID_FIELDS: [&str; 2] = ["@id", "id"];

/// 类型标签字段
const TYPE_FIELDS: [&str; 2] = ["@type", "type"];

/// 子项字段（按优先级）
const CHILDREN_FIELDS: [&str; 2] = ["items", "members"];

/// 旧方言中嵌套声明的字段
const LEGACY_RANGES_FIELD: &str = "ranges";

const VIEWING_HINT_FIELD: &str = "viewingHint";

/// 顶层 range 的 viewingHint 保留值
pub const TOP_HINT: &str = "top";

/// 子项的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Range,
    Canvas,
    Other,
}

impl ItemKind {
    /// 将类型标签规范化为子项类型（忽略大小写，兼容两种方言的拼写）
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "sc:range" | "range" => ItemKind::Range,
            "sc:canvas" | "canvas" => ItemKind::Canvas,
            _ => ItemKind::Other,
        }
    }

    /// 读取子项声明的类型，依次检查 `@type` 和 `type`
    pub fn of(item: &Value) -> Self {
        TYPE_FIELDS
            .iter()
            .filter_map(|field| item.get(field).and_then(Value::as_str))
            .map(Self::from_tag)
            .find(|kind| *kind != ItemKind::Other)
            .unwrap_or(ItemKind::Other)
    }
}

/// 声明的子项来源
#[derive(Debug, Clone, Copy)]
pub enum Children<'a> {
    /// `items` 或 `members`，需要按类型标签区分
    Tagged(&'a Value),
    /// 旧方言的 `ranges`，每一项都视为 range
    Legacy(&'a Value),
    /// 没有任何子项字段
    None,
}

/// 读取声明的标识符
pub fn id_of(node: &Value) -> Option<&str> {
    ID_FIELDS
        .iter()
        .find_map(|field| node.get(field).and_then(Value::as_str))
}

/// 是否被标记为顶层 range
pub fn is_top(node: &Value) -> bool {
    node.get(VIEWING_HINT_FIELD).and_then(Value::as_str) == Some(TOP_HINT)
}

/// 按优先级确定声明的子项来源
///
/// 只有在 `items` 和 `members` 都不存在时才会使用 `ranges`。
pub fn children_of(node: &Value) -> Children<'_> {
    if let Some(children) = CHILDREN_FIELDS
        .iter()
        .find_map(|field| node.get(field).filter(|value| !value.is_null()))
    {
        return Children::Tagged(children);
    }

    match node.get(LEGACY_RANGES_FIELD) {
        Some(ranges) if !ranges.is_null() => Children::Legacy(ranges),
        _ => Children::None,
    }
}

/// 在完整的声明列表中按标识符查找
pub fn find_by_id<'a>(declarations: &'a [Value], id: &str) -> Option<&'a Value> {
    declarations.iter().find(|declaration| {
        ID_FIELDS
            .iter()
            .any(|field| declaration.get(field).and_then(Value::as_str) == Some(id))
    })
}

/// 按语言区域解析标签
///
/// 支持纯字符串、Presentation 3 的语言映射（`{"en": ["..."]}`）
/// 以及 Presentation 2 的值列表（`{"@value": "...", "@language": "en"}`）。
/// 优先级：完全匹配的语言区域、主语言子标签、`none`/无语言标记、第一个值。
pub fn label_for_locale(label: &Value, locale: &str) -> Option<String> {
    let entries = label_entries(label);
    if entries.is_empty() {
        return None;
    }

    let primary = locale.split(['-', '_']).next().unwrap_or(locale);

    join_matching(&entries, |language| {
        language.is_some_and(|l| l.eq_ignore_ascii_case(locale))
    })
    .or_else(|| {
        join_matching(&entries, |language| {
            language.is_some_and(|l| {
                l.split(['-', '_'])
                    .next()
                    .is_some_and(|p| p.eq_ignore_ascii_case(primary))
            })
        })
    })
    .or_else(|| join_matching(&entries, |language| language.is_none_or(|l| l == "none")))
    .or_else(|| {
        entries
            .first()
            .and_then(|(_, values)| values.first())
            .map(|value| value.to_string())
    })
}

/// 拼接所有语言满足条件的值
fn join_matching<F>(entries: &[(Option<String>, Vec<&str>)], matches: F) -> Option<String>
where
    F: Fn(Option<&str>) -> bool,
{
    let values: Vec<&str> = entries
        .iter()
        .filter(|(language, _)| matches(language.as_deref()))
        .flat_map(|(_, values)| values.iter().copied())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// 将标签展开为（语言, 值列表）条目
fn label_entries(label: &Value) -> Vec<(Option<String>, Vec<&str>)> {
    match label {
        Value::String(text) => vec![(None, vec![text.as_str()])],
        Value::Array(values) => values.iter().flat_map(label_entries).collect(),
        Value::Object(map) if map.contains_key("@value") => {
            let language = map
                .get("@language")
                .and_then(Value::as_str)
                .map(str::to_string);
            match map.get("@value").and_then(Value::as_str) {
                Some(text) => vec![(language, vec![text])],
                None => Vec::new(),
            }
        }
        Value::Object(map) => map
            .iter()
            .map(|(language, values)| {
                let texts = match values {
                    Value::String(text) => vec![text.as_str()],
                    Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                    _ => Vec::new(),
                };
                (Some(language.clone()), texts)
            })
            .filter(|(_, texts)| !texts.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"@type": "sc:Range"}), ItemKind::Range)]
    #[case(json!({"@type": "SC:RANGE"}), ItemKind::Range)]
    #[case(json!({"type": "Range"}), ItemKind::Range)]
    #[case(json!({"type": "range"}), ItemKind::Range)]
    #[case(json!({"@type": "sc:Canvas"}), ItemKind::Canvas)]
    #[case(json!({"type": "Canvas"}), ItemKind::Canvas)]
    #[case(json!({"type": "Annotation"}), ItemKind::Other)]
    #[case(json!({"type": 7}), ItemKind::Other)]
    #[case(json!({}), ItemKind::Other)]
    #[case(json!("r1"), ItemKind::Other)]
    fn test_item_kind(#[case] item: Value, #[case] expected: ItemKind) {
        assert_eq!(ItemKind::of(&item), expected);
    }

    #[test]
    fn test_item_kind_checks_both_tag_fields() {
        let item = json!({"@type": "oa:Annotation", "type": "Canvas"});
        assert_eq!(ItemKind::of(&item), ItemKind::Canvas);
    }

    #[test]
    fn test_id_of_prefers_at_id() {
        assert_eq!(id_of(&json!({"@id": "a", "id": "b"})), Some("a"));
        assert_eq!(id_of(&json!({"id": "b"})), Some("b"));
        assert_eq!(id_of(&json!({"id": 3})), None);
        assert_eq!(id_of(&json!({})), None);
    }

    #[test]
    fn test_is_top() {
        assert!(is_top(&json!({"viewingHint": "top"})));
        assert!(!is_top(&json!({"viewingHint": "paged"})));
        assert!(!is_top(&json!({})));
    }

    #[test]
    fn test_children_priority() {
        let both = json!({"items": [], "members": [1], "ranges": [2]});
        assert!(matches!(children_of(&both), Children::Tagged(v) if v == &json!([])));

        let members = json!({"members": [1], "ranges": [2]});
        assert!(matches!(children_of(&members), Children::Tagged(v) if v == &json!([1])));

        let legacy = json!({"ranges": ["a"]});
        assert!(matches!(children_of(&legacy), Children::Legacy(_)));

        let null_items = json!({"items": null, "ranges": ["a"]});
        assert!(matches!(children_of(&null_items), Children::Legacy(_)));

        assert!(matches!(children_of(&json!({"id": "leaf"})), Children::None));
    }

    #[test]
    fn test_find_by_id() {
        let declarations = vec![json!({"@id": "a"}), json!({"id": "b"})];
        assert_eq!(find_by_id(&declarations, "b"), Some(&declarations[1]));
        assert_eq!(find_by_id(&declarations, "c"), None);
    }

    #[rstest]
    #[case(json!("Chapter 1"), "en-GB", Some("Chapter 1"))]
    #[case(json!({"en": ["Chapter 1"], "fr": ["Chapitre 1"]}), "fr", Some("Chapitre 1"))]
    #[case(json!({"en": ["Chapter 1"], "fr": ["Chapitre 1"]}), "en-GB", Some("Chapter 1"))]
    #[case(json!({"none": ["I"], "de": ["Kapitel"]}), "en-GB", Some("I"))]
    #[case(json!({"de": ["Kapitel"]}), "en-GB", Some("Kapitel"))]
    #[case(json!({"en": ["a", "b"]}), "en", Some("a, b"))]
    #[case(json!([{"@value": "One", "@language": "en"}, {"@value": "Un", "@language": "fr"}]), "fr-FR", Some("Un"))]
    #[case(json!([{"@value": "One"}]), "fr", Some("One"))]
    #[case(json!(42), "en", None)]
    #[case(json!({}), "en", None)]
    fn test_label_for_locale(#[case] label: Value, #[case] locale: &str, #[case] expected: Option<&str>) {
        assert_eq!(label_for_locale(&label, locale).as_deref(), expected);
    }
}
