//! 清单选项配置模块
//!
//! 提供构造清单时使用的选项，支持从YAML文件加载配置。
//! 这些选项在解析时原样传递给每一个创建出来的 range。

use crate::manifest::error::{ManifestError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "rangeforge.yaml";

/// 默认语言区域
pub const DEFAULT_LOCALE: &str = "en-GB";

/// 默认的 range 最大嵌套深度
pub const DEFAULT_MAX_RANGE_DEPTH: usize = 256;

/// 默认的单个清单 range 数量上限
pub const DEFAULT_MAX_RANGES: usize = 100_000;

/// 清单构造选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestOptions {
    /// 解析标签时优先使用的语言区域
    pub locale: String,
    /// 是否对受限资源采用悲观的访问控制策略
    pub pessimistic_access_control: bool,
    /// 导航日期（可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_date: Option<String>,
    /// 清单在集合中的索引
    pub index: usize,
    /// range 的最大嵌套深度（顶层为 0），更深的分支被放弃
    pub max_range_depth: usize,
    /// 单个清单最多创建的 range 数量
    pub max_ranges: usize,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            pessimistic_access_control: false,
            nav_date: None,
            index: 0,
            max_range_depth: DEFAULT_MAX_RANGE_DEPTH,
            max_ranges: DEFAULT_MAX_RANGES,
        }
    }
}

impl ManifestOptions {
    /// 使用指定语言区域创建选项
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// 设置清单索引
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// 从YAML配置文件中加载选项
    ///
    /// 文件中缺少的字段使用默认值。
    ///
    /// # 示例
    ///
    /// ```rust,no_run
    /// use rangeforge::ManifestOptions;
    /// let options = ManifestOptions::from_file("rangeforge.yaml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ManifestError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| ManifestError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default())
            .map_err(|e| ManifestError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# rangeforge 配置文件\n# 构造清单时传递给每个 range 的选项\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| ManifestError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 尝试从配置文件加载，如果文件不存在则先生成配置文件
    ///
    /// 任何失败都会退回到默认选项。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            if let Err(e) = Self::generate_default_config(path) {
                tracing::warn!("无法生成默认配置文件 {}: {}", path.display(), e);
            }
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("{}，使用默认配置", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_options() {
        let options = ManifestOptions::default();
        assert_eq!(options.locale, "en-GB");
        assert!(!options.pessimistic_access_control);
        assert_eq!(options.nav_date, None);
        assert_eq!(options.index, 0);
        assert_eq!(options.max_range_depth, DEFAULT_MAX_RANGE_DEPTH);
        assert_eq!(options.max_ranges, DEFAULT_MAX_RANGES);
    }

    #[test]
    fn test_generate_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rangeforge.yaml");

        ManifestOptions::generate_default_config(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# rangeforge"));

        let loaded = ManifestOptions::from_file(&path).unwrap();
        assert_eq!(loaded, ManifestOptions::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        fs::write(&path, "locale: fr\nindex: 3\nmax_range_depth: 16\n").unwrap();

        let loaded = ManifestOptions::from_file(&path).unwrap();
        assert_eq!(loaded.locale, "fr");
        assert_eq!(loaded.index, 3);
        assert_eq!(loaded.max_range_depth, 16);
        assert_eq!(loaded.max_ranges, DEFAULT_MAX_RANGES);
        assert!(!loaded.pessimistic_access_control);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "locale: [unclosed\n").unwrap();

        let result = ManifestOptions::from_file(&path);
        assert!(matches!(result, Err(ManifestError::ConfigError(_))));
    }

    #[test]
    fn test_load_or_default_generates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let options = ManifestOptions::load_or_default(&path);
        assert_eq!(options, ManifestOptions::default());
        assert!(path.exists());
    }
}
