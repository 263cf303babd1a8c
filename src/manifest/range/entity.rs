//! Range实体和森林结构定义
//!
//! 所有 range 都由 [`RangeForest`] 这个 arena 持有，父子关系通过 [`RangeId`] 表达：
//! 子节点列表是所有权方向（自顶向下），父引用只是一个查找键，不参与所有权。

use std::rc::Rc;

use crate::manifest::config::ManifestOptions;

/// range 在森林中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeId(pub(crate) usize);

impl RangeId {
    /// arena 中的位置
    pub fn index(self) -> usize {
        self.0
    }
}

/// 导航树中的一个节点（章节、分组等）
#[derive(Debug, Clone)]
pub struct Range {
    pub(crate) key: RangeId,
    pub(crate) id: Option<String>,
    pub(crate) path: String,
    pub(crate) label: Option<String>,
    pub(crate) parent: Option<RangeId>,
    pub(crate) items: Vec<RangeId>,
    pub(crate) canvases: Vec<String>,
    pub(crate) options: Rc<ManifestOptions>,
}

impl Range {
    /// range 在森林中的索引
    pub fn key(&self) -> RangeId {
        self.key
    }

    /// 标识符；合成的包装节点没有标识符
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// 按声明顺序分配的位置路径，例如 `"0/1/2"`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 按配置的语言区域解析出的标签
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// 父节点索引；顶层 range 为 `None`
    pub fn parent(&self) -> Option<RangeId> {
        self.parent
    }

    /// 子 range 索引，按声明顺序排列
    pub fn items(&self) -> &[RangeId] {
        &self.items
    }

    /// 直接声明在此 range 下的 canvas 标识符
    pub fn canvas_ids(&self) -> &[String] {
        &self.canvases
    }

    /// 是否直接包含指定的 canvas
    pub fn has_canvas(&self, canvas_id: &str) -> bool {
        self.canvases.iter().any(|id| id == canvas_id)
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// 构造时传入的清单选项
    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// 节点深度，顶层为 0
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }

    /// 将路径解析为索引数组
    ///
    /// 路径由解析器生成，总是合法的数字序列。
    pub fn index_path(&self) -> Vec<usize> {
        self.path
            .split('/')
            .filter_map(|segment| segment.parse().ok())
            .collect()
    }
}

/// range 森林
///
/// 持有所有 range，并记录顶层 range 的顺序。构造完成后不再修改。
#[derive(Debug, Clone, Default)]
pub struct RangeForest {
    nodes: Vec<Range>,
    roots: Vec<RangeId>,
}

impl RangeForest {
    /// 创建空森林
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个 range 并挂到父节点（或顶层列表）下
    pub(crate) fn insert(
        &mut self,
        id: Option<String>,
        path: String,
        label: Option<String>,
        parent: Option<RangeId>,
        options: Rc<ManifestOptions>,
    ) -> RangeId {
        let key = RangeId(self.nodes.len());
        self.nodes.push(Range {
            key,
            id,
            path,
            label,
            parent,
            items: Vec::new(),
            canvases: Vec::new(),
            options,
        });

        match parent {
            Some(parent) => self.nodes[parent.0].items.push(key),
            None => self.roots.push(key),
        }

        key
    }

    /// 向 range 追加 canvas 标识符
    pub(crate) fn push_canvas(&mut self, key: RangeId, canvas_id: String) {
        self.nodes[key.0].canvases.push(canvas_id);
    }

    /// 按索引获取 range
    pub fn get(&self, key: RangeId) -> Option<&Range> {
        self.nodes.get(key.0)
    }

    /// 顶层 range，按文档顺序
    pub fn top_ranges(&self) -> impl Iterator<Item = &Range> {
        self.roots.iter().filter_map(|key| self.get(*key))
    }

    /// 顶层 range 的索引
    pub fn root_keys(&self) -> &[RangeId] {
        &self.roots
    }

    /// 子 range，按声明顺序
    pub fn child_ranges<'a>(&'a self, range: &'a Range) -> impl Iterator<Item = &'a Range> {
        range.items.iter().filter_map(|key| self.get(*key))
    }

    /// 父 range
    pub fn parent_of(&self, range: &Range) -> Option<&Range> {
        range.parent.and_then(|key| self.get(key))
    }

    /// 从父节点到顶层的祖先链
    pub fn ancestors<'a>(&'a self, range: &'a Range) -> impl Iterator<Item = &'a Range> {
        std::iter::successors(self.parent_of(range), |current| self.parent_of(current))
    }

    /// range 总数（包括合成的包装节点）
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
