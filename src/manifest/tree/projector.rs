//! 树视图投影
//!
//! 把 range 森林转换成通用的 [`TreeNode`] 树。
//! 树的深度受解析时的最大嵌套深度约束，因此这里直接递归。

use crate::manifest::range::{Range, RangeForest};
use crate::manifest::tree::node::{TreeNode, TreeNodeType};

/// 默认树根节点的标签
pub const ROOT_LABEL: &str = "root";

/// 从森林构建默认树
///
/// 根节点类型为 [`TreeNodeType::Manifest`]，标签固定为 [`ROOT_LABEL`]。森林非空时，
/// 第一个顶层 range（可能是合成的包装节点）的子树挂在根节点下；最后统一分配节点 id。
pub fn project_forest(forest: &RangeForest) -> TreeNode {
    let mut root = TreeNode::new(TreeNodeType::Manifest, ROOT_LABEL);

    if let Some(top) = forest.top_ranges().next() {
        root.range_path = Some(top.path().to_string());
        for child in forest.child_ranges(top) {
            root.add_child(project_range(forest, child));
        }
    }

    root.generate_ids();
    root
}

/// 构建以指定 range 为根的子树
///
/// 返回的树同样已经分配好 id，根节点为 `"0"`。
pub fn range_tree(forest: &RangeForest, range: &Range) -> TreeNode {
    let mut node = project_range(forest, range);
    node.generate_ids();
    node
}

/// 转换 range 为树节点
fn project_range(forest: &RangeForest, range: &Range) -> TreeNode {
    let mut node = TreeNode::new(TreeNodeType::Range, range.label().unwrap_or_default())
        .with_range_path(range.path());

    for child in forest.child_ranges(range) {
        node.add_child(project_range(forest, child));
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::config::ManifestOptions;
    use crate::manifest::range::parse_ranges;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::rc::Rc;

    fn forest_of(structures: Value) -> RangeForest {
        let declarations = structures.as_array().cloned().unwrap_or_default();
        parse_ranges(&declarations, Rc::new(ManifestOptions::default())).forest
    }

    #[test]
    fn test_empty_forest_yields_bare_root() {
        let tree = project_forest(&RangeForest::new());
        assert_eq!(tree.node_type, TreeNodeType::Manifest);
        assert_eq!(tree.label, ROOT_LABEL);
        assert_eq!(tree.id, "0");
        assert!(tree.children.is_empty());
        assert_eq!(tree.range_path, None);
    }

    #[test]
    fn test_first_top_range_subtree() {
        let forest = forest_of(json!([
            {"@id": "toc", "viewingHint": "top", "label": "Contents", "members": [
                {"@id": "ch1", "@type": "sc:Range", "label": "Chapter 1", "members": [
                    {"@id": "s1", "@type": "sc:Range", "label": "Section 1"}
                ]},
                {"@id": "ch2", "@type": "sc:Range", "label": "Chapter 2"}
            ]},
            {"@id": "other", "viewingHint": "top", "members": [
                {"@id": "x", "@type": "sc:Range"}
            ]}
        ]));

        let tree = project_forest(&forest);
        assert_eq!(tree.label, ROOT_LABEL);
        assert_eq!(tree.range_path.as_deref(), Some("0"));
        assert_eq!(tree.children.len(), 2);

        let ch1 = &tree.children[0];
        assert_eq!(ch1.id, "0-0");
        assert_eq!(ch1.label, "Chapter 1");
        assert_eq!(ch1.node_type, TreeNodeType::Range);
        assert_eq!(ch1.range_path.as_deref(), Some("0/0"));
        assert_eq!(ch1.children[0].id, "0-0-0");
        assert_eq!(ch1.children[0].label, "Section 1");

        assert_eq!(tree.children[1].id, "0-1");
        assert_eq!(tree.total_nodes(), 4);
    }

    #[test]
    fn test_wrapper_children_become_root_children() {
        let forest = forest_of(json!([
            {"id": "r1", "items": [
                {"id": "r2", "type": "range", "items": [{"id": "c1", "type": "canvas"}]}
            ]}
        ]));

        let tree = project_forest(&forest);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].range_path.as_deref(), Some("0/0"));
        assert_eq!(tree.children[0].children[0].range_path.as_deref(), Some("0/0/0"));
        assert!(tree.children[0].children[0].is_leaf());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let forest = forest_of(json!([
            {"@id": "a", "ranges": ["b", "c"]},
            {"@id": "b", "ranges": ["c"]},
            {"@id": "c"}
        ]));

        assert_eq!(project_forest(&forest), project_forest(&forest));
    }

    #[test]
    fn test_range_tree() {
        let forest = forest_of(json!([
            {"@id": "a", "viewingHint": "top", "ranges": ["b"]},
            {"@id": "b", "label": "B", "ranges": ["c"]},
            {"@id": "c", "label": "C"}
        ]));
        let b = forest.top_ranges().next().and_then(|a| forest.child_ranges(a).next()).unwrap();

        let tree = range_tree(&forest, b);
        assert_eq!(tree.id, "0");
        assert_eq!(tree.label, "B");
        assert_eq!(tree.children[0].id, "0-0");
        assert_eq!(tree.children[0].label, "C");
    }
}
