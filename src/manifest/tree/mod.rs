//! 树视图模块
//!
//! 将 range 森林投影为供界面使用的通用树，并提供文本渲染。

pub mod node;
pub mod projector;
pub mod view;

pub use node::{TreeNode, TreeNodeType};
pub use projector::{ROOT_LABEL, project_forest, range_tree};
pub use view::{TreeStatistics, TreeStyle, TreeView};
