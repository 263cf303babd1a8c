//! 通用树节点
//!
//! 供界面层使用的树结构。节点的 `id` 由 [`TreeNode::generate_ids`] 按位置生成，
//! 同一份森林重复构建时得到完全相同的 id，界面可以据此保留展开/折叠状态。

use serde::Serialize;

/// 树节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeType {
    Manifest,
    Range,
}

impl TreeNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeNodeType::Manifest => "manifest",
            TreeNodeType::Range => "range",
        }
    }
}

/// 树节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// 按位置生成的稳定标识符，例如 `"0-1-2"`
    pub id: String,
    /// 显示标签
    pub label: String,
    /// 节点类型
    #[serde(rename = "type")]
    pub node_type: TreeNodeType,
    /// 对应 range 的路径，可用于回查 range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_path: Option<String>,
    /// 子节点
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// 创建新的树节点（id 在 [`generate_ids`](Self::generate_ids) 时分配）
    pub fn new(node_type: TreeNodeType, label: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            node_type,
            range_path: None,
            children: Vec::new(),
        }
    }

    /// 关联 range 路径
    pub fn with_range_path(mut self, path: impl Into<String>) -> Self {
        self.range_path = Some(path.into());
        self
    }

    /// 添加子节点
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// 为整棵树分配 id
    ///
    /// 当前节点为 `"0"`，第 i 个子节点为 `"<父节点id>-<i>"`，按先序遍历分配。
    pub fn generate_ids(&mut self) {
        self.assign_id("0".to_string());
    }

    fn assign_id(&mut self, id: String) {
        for (index, child) in self.children.iter_mut().enumerate() {
            child.assign_id(format!("{}-{}", id, index));
        }
        self.id = id;
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 获取节点及其所有子节点的数量
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(TreeNode::total_nodes).sum::<usize>()
    }

    /// 获取子树的最大深度（当前节点为 0）
    pub fn max_depth(&self) -> u32 {
        self.children
            .iter()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// 收集所有叶子节点
    pub fn collect_leaf_nodes(&self) -> Vec<&TreeNode> {
        if self.children.is_empty() {
            vec![self]
        } else {
            self.children
                .iter()
                .flat_map(TreeNode::collect_leaf_nodes)
                .collect()
        }
    }

    /// 根据ID查找节点
    pub fn find_by_id(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// 根据索引路径获取子节点
    ///
    /// - `[]` 表示当前节点本身
    /// - `[0, 1]` 表示第一个子节点的第二个子节点
    pub fn get_node_by_path(&self, path: &[usize]) -> Option<&TreeNode> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.get_node_by_path(rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeNode {
        let mut root = TreeNode::new(TreeNodeType::Manifest, "root");
        let mut chapter = TreeNode::new(TreeNodeType::Range, "Chapter 1");
        chapter.add_child(TreeNode::new(TreeNodeType::Range, "Section 1.1"));
        chapter.add_child(TreeNode::new(TreeNodeType::Range, "Section 1.2"));
        root.add_child(chapter);
        root.add_child(TreeNode::new(TreeNodeType::Range, "Chapter 2"));
        root.generate_ids();
        root
    }

    fn collect_ids(node: &TreeNode, ids: &mut Vec<String>) {
        ids.push(node.id.clone());
        for child in &node.children {
            collect_ids(child, ids);
        }
    }

    #[test]
    fn test_generate_ids() {
        let root = sample();
        let mut ids = Vec::new();
        collect_ids(&root, &mut ids);
        assert_eq!(ids, vec!["0", "0-0", "0-0-0", "0-0-1", "0-1"]);
    }

    #[test]
    fn test_generate_ids_is_idempotent() {
        let mut root = sample();
        let before = root.clone();
        root.generate_ids();
        assert_eq!(root, before);
    }

    #[test]
    fn test_statistics_helpers() {
        let root = sample();
        assert_eq!(root.total_nodes(), 5);
        assert_eq!(root.max_depth(), 2);
        assert_eq!(root.collect_leaf_nodes().len(), 3);
        assert!(!root.is_leaf());
    }

    #[test]
    fn test_find_by_id_and_path() {
        let root = sample();
        assert_eq!(root.find_by_id("0-0-1").map(|n| n.label.as_str()), Some("Section 1.2"));
        assert!(root.find_by_id("0-9").is_none());

        assert_eq!(root.get_node_by_path(&[]).map(|n| n.id.as_str()), Some("0"));
        assert_eq!(root.get_node_by_path(&[0, 0]).map(|n| n.label.as_str()), Some("Section 1.1"));
        assert!(root.get_node_by_path(&[1, 0]).is_none());
    }

    #[test]
    fn test_serialize() {
        let root = sample();
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["type"], "manifest");
        assert_eq!(json["children"][0]["type"], "range");
        assert_eq!(json["children"][1]["id"], "0-1");
        assert!(json["children"][1].get("children").is_none());
    }
}
