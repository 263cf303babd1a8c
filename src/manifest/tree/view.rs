//! 树视图显示模块
//!
//! 提供树结构的文本渲染和统计功能。

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::manifest::tree::node::TreeNode;

/// 树视图显示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// 使用树状符号（├── └──）
    #[default]
    TreeSymbols,
    /// 使用缩进和符号（• ）
    Indented,
}

/// 可显示的树视图
#[derive(Debug, Clone)]
pub struct TreeView<'a> {
    /// 根节点
    pub root: &'a TreeNode,
    /// 显示样式
    pub style: TreeStyle,
    /// 是否显示节点id和range路径
    pub show_ids: bool,
    /// 最大显示深度（None表示显示所有）
    pub max_depth: Option<u32>,
}

impl<'a> TreeView<'a> {
    /// 创建新的树视图
    pub fn new(root: &'a TreeNode) -> Self {
        Self {
            root,
            style: TreeStyle::TreeSymbols,
            show_ids: false,
            max_depth: None,
        }
    }

    /// 设置显示样式
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// 设置是否显示节点id
    pub fn with_show_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// 设置最大显示深度
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 获取树的统计信息（不计根节点）
    pub fn statistics(&self) -> TreeStatistics {
        let leaf_count = if self.root.is_leaf() {
            0
        } else {
            self.root.collect_leaf_nodes().len()
        };

        TreeStatistics {
            total_nodes: self.root.total_nodes() - 1,
            max_depth: self.root.max_depth(),
            leaf_count,
        }
    }

    /// 格式化单个节点的内容
    fn node_content(&self, node: &TreeNode) -> String {
        let label = if node.label.is_empty() {
            "(无标题)"
        } else {
            node.label.as_str()
        };

        if !self.show_ids {
            return label.to_string();
        }

        match &node.range_path {
            Some(path) => format!("[{}] {} → {}", node.id, label, path),
            None => format!("[{}] {}", node.id, label),
        }
    }

    fn depth_allows(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max_depth| depth < max_depth)
    }

    /// 渲染树状符号风格
    fn render_tree_style(&self, node: &TreeNode, depth: u32, is_last: bool, prefix: &str, result: &mut String) {
        if !self.depth_allows(depth) {
            return;
        }

        let current_prefix = if is_last { "└── " } else { "├── " };
        result.push_str(&format!("{}{}{}\n", prefix, current_prefix, self.node_content(node)));

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (index, child) in node.children.iter().enumerate() {
            let is_child_last = index == node.children.len() - 1;
            self.render_tree_style(child, depth + 1, is_child_last, &child_prefix, result);
        }
    }

    /// 渲染缩进风格
    fn render_indent_style(&self, node: &TreeNode, depth: u32, result: &mut String) {
        if !self.depth_allows(depth) {
            return;
        }

        let indent = "  ".repeat(depth as usize);
        result.push_str(&format!("{}• {}\n", indent, self.node_content(node)));

        for child in &node.children {
            self.render_indent_style(child, depth + 1, result);
        }
    }
}

impl Display for TreeView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut result = String::new();

        let depth_info = match self.max_depth {
            Some(max_depth) => format!(" (深度限制: {})", max_depth),
            None => String::new(),
        };
        result.push_str(&format!("📖 {}{}\n", self.node_content(self.root), depth_info));
        result.push_str("═══════════════════════════════════════\n");

        for (index, child) in self.root.children.iter().enumerate() {
            match self.style {
                TreeStyle::TreeSymbols => {
                    let is_last = index == self.root.children.len() - 1;
                    self.render_tree_style(child, 0, is_last, "", &mut result);
                }
                TreeStyle::Indented => self.render_indent_style(child, 0, &mut result),
            }
        }

        write!(f, "{}", result)
    }
}

/// 树统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStatistics {
    /// 总节点数
    pub total_nodes: usize,
    /// 最大深度
    pub max_depth: u32,
    /// 叶子节点数
    pub leaf_count: usize,
}

impl Display for TreeStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "目录统计: {} 个range, {} 个叶子节点, 最大深度: {}",
            self.total_nodes, self.leaf_count, self.max_depth
        )
    }
}
