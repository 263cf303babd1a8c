use std::fs;
use std::path::Path;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use serde_json::Value;
use tracing::{debug, info};

use crate::manifest::config::ManifestOptions;
use crate::manifest::error::{ManifestError, ParseIssue, Result};
use crate::manifest::range::declaration;
use crate::manifest::range::{Range, RangeForest, RangeIndex, parse_ranges};
use crate::manifest::tree::{self, TreeNode};

/// 结构声明所在的字段
const STRUCTURES_FIELD: &str = "structures";

/// 表示一个已加载的清单
///
/// range 森林在构造时一次性解析完成；平铺索引和默认树在第一次访问时计算并缓存，
/// 之后不会失效，因为原始文档在构造后被视为不可变。
///
/// 平铺索引只能通过清单访问，它始终与清单自己的森林配对：
///
/// ```compile_fail
/// use rangeforge::RangeIndex;
/// ```
pub struct Manifest {
    jsonld: Value,
    options: Rc<ManifestOptions>,
    forest: RangeForest,
    issues: Vec<ParseIssue>,
    index: RangeIndex,
    default_tree: OnceCell<TreeNode>,
}

impl Manifest {
    /// 从JSON值创建清单
    ///
    /// 构造总是成功：结构中的问题只会记录在 [`parse_issues`](Self::parse_issues) 中，
    /// 最坏情况下得到一个空的或不完整的森林。
    pub fn from_value(jsonld: Value, options: ManifestOptions) -> Manifest {
        let options = Rc::new(options);

        let parsed = match jsonld.get(STRUCTURES_FIELD).and_then(Value::as_array) {
            Some(structures) => parse_ranges(structures, options.clone()),
            None => {
                debug!("清单中没有structures字段");
                Default::default()
            }
        };

        Manifest {
            jsonld,
            options,
            forest: parsed.forest,
            issues: parsed.issues,
            index: RangeIndex::new(),
            default_tree: OnceCell::new(),
        }
    }

    /// 从JSON字符串创建清单
    ///
    /// # 返回值
    /// * `Result<Manifest, ManifestError>` - JSON语法错误或根节点不是对象时返回错误
    pub fn from_json_str(content: &str, options: ManifestOptions) -> Result<Manifest> {
        let jsonld: Value = serde_json::from_str(content)?;
        if !jsonld.is_object() {
            return Err(ManifestError::InvalidManifest(
                "清单的根节点必须是JSON对象".to_string(),
            ));
        }
        Ok(Self::from_value(jsonld, options))
    }

    /// 从文件路径创建清单
    ///
    /// # 参数
    /// * `path` - 清单JSON文件的路径
    /// * `options` - 清单选项
    pub fn from_path<P: AsRef<Path>>(path: P, options: ManifestOptions) -> Result<Manifest> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let manifest = Self::from_json_str(&content, options)?;
        info!(
            "已加载清单 {}: {} 个range",
            path.display(),
            manifest.forest.len()
        );
        Ok(manifest)
    }

    /// 原始JSON文档
    pub fn jsonld(&self) -> &Value {
        &self.jsonld
    }

    /// 清单标识符
    pub fn id(&self) -> Option<&str> {
        declaration::id_of(&self.jsonld)
    }

    /// 按配置的语言区域解析出的清单标签
    pub fn label(&self) -> Option<String> {
        self.jsonld
            .get("label")
            .and_then(|label| declaration::label_for_locale(label, &self.options.locale))
    }

    /// 构造时使用的选项
    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// range 森林
    pub fn forest(&self) -> &RangeForest {
        &self.forest
    }

    /// 顶层 range（或合成的包装节点），按文档顺序
    pub fn top_ranges(&self) -> Vec<&Range> {
        self.forest.top_ranges().collect()
    }

    /// 平铺后的全部 range
    ///
    /// 顺序为每个带标识符的顶层 range，随后是它的子孙节点的深度优先遍历；
    /// 合成的包装节点不包含在内。
    pub fn all_ranges(&self) -> Vec<&Range> {
        self.index.all(&self.forest)
    }

    /// 按标识符查找 range
    pub fn range_by_id(&self, id: &str) -> Option<&Range> {
        self.index.by_id(&self.forest, id)
    }

    /// 按路径查找 range
    pub fn range_by_path(&self, path: &str) -> Option<&Range> {
        self.index.by_path(&self.forest, path)
    }

    /// range 的父节点
    pub fn parent_of(&self, range: &Range) -> Option<&Range> {
        self.forest.parent_of(range)
    }

    /// range 的子节点
    pub fn child_ranges<'a>(&'a self, range: &'a Range) -> Vec<&'a Range> {
        self.forest.child_ranges(range).collect()
    }

    /// 解析时记录的非致命问题
    pub fn parse_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// 默认树
    ///
    /// 根节点为清单类型、标签为 `"root"`，第一个顶层 range 的子树挂在根节点下。
    pub fn default_tree(&self) -> &TreeNode {
        self.default_tree.get_or_init(|| {
            debug!("构建默认树");
            tree::project_forest(&self.forest)
        })
    }

    /// 以指定 range 为根的子树
    pub fn range_tree(&self, range: &Range) -> TreeNode {
        tree::range_tree(&self.forest, range)
    }
}
