use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManifestError>;

/// 清单加载相关的错误类型
///
/// 只覆盖读取文档本身的失败；range 结构中的问题不会导致构造失败，
/// 而是以 [`ParseIssue`] 的形式记录下来。
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("JSON解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("不是有效的清单文档: {0}")]
    InvalidManifest(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

/// range 解析过程中遇到的非致命问题
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// 字符串引用在声明列表中找不到对应的 range，该分支被跳过
    #[error("Range: {id} 不存在")]
    UnresolvedReference { id: String },

    /// 声明没有任何可识别的子项字段，按叶子节点处理
    #[error("路径 {path} 处的声明没有子项字段，按叶子节点处理")]
    MalformedStructure { path: String },

    /// 引用指向了自己的祖先，继续展开会形成环
    #[error("Range: {id} 在路径 {path} 处形成循环引用，已跳过")]
    CyclicReference { id: String, path: String },

    /// canvas 子项缺少标识符
    #[error("路径 {path} 处的 canvas 缺少标识符，已忽略")]
    MissingCanvasId { path: String },

    /// 嵌套超过允许的最大深度，该分支被放弃
    #[error("路径 {path} 处超过最大嵌套深度，已放弃该分支")]
    DepthLimitExceeded { path: String },

    /// range 数量达到上限，其余分支被放弃
    #[error("range数量达到上限 {limit}，其余分支被放弃")]
    RangeLimitExceeded { limit: usize },
}

impl ParseIssue {
    /// 是否需要以警告级别报告
    pub fn is_warning(&self) -> bool {
        !matches!(self, ParseIssue::MalformedStructure { .. })
    }
}
