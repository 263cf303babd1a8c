pub mod config;
pub mod error;
pub mod range;
pub mod reader;
pub mod tree;

// 重新导出错误处理
pub use error::{ManifestError, ParseIssue, Result};

// 重新导出配置
pub use config::ManifestOptions;

// 重新导出清单读取器
pub use reader::Manifest;

// 重新导出range相关
pub use range::{
    ItemKind,
    Range,
    RangeForest,
    RangeId,
    RangeParser,
    ParsedRanges,
    parse_ranges,
    label_for_locale,
};

// 重新导出树视图相关
pub use tree::{
    TreeNode,
    TreeNodeType,
    TreeStatistics,
    TreeStyle,
    TreeView,
};
