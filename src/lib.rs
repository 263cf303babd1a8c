pub mod manifest;

// === 核心API重新导出 ===

/// 清单（主要接口）
pub use manifest::Manifest;

/// 错误处理
pub use manifest::{ManifestError, ParseIssue, Result};

/// 配置
pub use manifest::ManifestOptions;

// === 数据结构 ===

/// Range实体
pub use manifest::{Range, RangeForest, RangeId};

/// 树视图
pub use manifest::{TreeNode, TreeNodeType, TreeStatistics, TreeStyle, TreeView};

// === 底层组件（高级用法） ===

/// Range解析与索引
pub use manifest::{ItemKind, ParsedRanges, RangeParser, label_for_locale, parse_ranges};

// === 库信息 ===

/// rangeforge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// rangeforge库的描述
pub const DESCRIPTION: &str = "一个解析IIIF清单结构并生成可导航目录树的库";

// === 便捷函数 ===

/// 快速打开清单文件
///
/// 这是 `Manifest::from_path` 使用默认选项的便捷包装函数。
///
/// # 示例
///
/// ```rust,no_run
/// let manifest = rangeforge::open("manifest.json")?;
/// for range in manifest.all_ranges() {
///     println!("{} {:?}", range.path(), range.id());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Manifest> {
    Manifest::from_path(path, ManifestOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
    }
}
