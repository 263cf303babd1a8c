//! Range索引模块
//!
//! 将森林平铺为去重且顺序稳定的列表，并在其上提供按标识符、按路径的查找。
//! 平铺结果在第一次访问时计算并缓存；缓存从不失效，因为森林在构造后不会再变化。
//! 如果以后支持重新解析，必须同时丢弃这里的缓存。

use std::collections::HashSet;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::manifest::range::entity::{Range, RangeForest, RangeId};

/// 平铺后的 range 索引
///
/// 索引只缓存 [`RangeId`]，不记录它来自哪个森林，
/// 所以只在清单内部与清单自己的森林配对使用。
#[derive(Debug, Clone, Default)]
pub(crate) struct RangeIndex {
    flattened: OnceCell<Vec<RangeId>>,
}

impl RangeIndex {
    /// 创建空索引（尚未平铺）
    pub fn new() -> Self {
        Self::default()
    }

    /// 平铺后的 range 索引列表
    ///
    /// 顺序为：每个带标识符的顶层 range（合成的包装节点没有标识符，不包含在内，
    /// 但它的子孙节点会包含在内），随后是该顶层 range 子孙节点的深度优先遍历。
    pub fn keys(&self, forest: &RangeForest) -> &[RangeId] {
        self.flattened.get_or_init(|| {
            let keys = flatten(forest);
            debug!("平铺range索引: {} 个range", keys.len());
            keys
        })
    }

    /// 平铺后的 range 列表
    pub fn all<'a>(&'a self, forest: &'a RangeForest) -> Vec<&'a Range> {
        self.keys(forest)
            .iter()
            .filter_map(|key| forest.get(*key))
            .collect()
    }

    /// 按标识符查找第一个匹配的 range
    pub fn by_id<'a>(&'a self, forest: &'a RangeForest, id: &str) -> Option<&'a Range> {
        self.find(forest, |range| range.id() == Some(id))
    }

    /// 按路径精确查找第一个匹配的 range
    pub fn by_path<'a>(&'a self, forest: &'a RangeForest, path: &str) -> Option<&'a Range> {
        self.find(forest, |range| range.path() == path)
    }

    fn find<'a, F>(&'a self, forest: &'a RangeForest, predicate: F) -> Option<&'a Range>
    where
        F: Fn(&Range) -> bool,
    {
        self.keys(forest)
            .iter()
            .filter_map(|key| forest.get(*key))
            .find(|range| predicate(range))
    }
}

/// 平铺森林
///
/// 用按索引（身份）记录的已访问集合防止重复访问；正常解析出的森林是一棵树，
/// 不会触发这种情况。
fn flatten(forest: &RangeForest) -> Vec<RangeId> {
    let mut flattened = Vec::new();
    let mut visited = HashSet::new();

    for top in forest.top_ranges() {
        if top.id().is_some() && visited.insert(top.key()) {
            flattened.push(top.key());
        }

        // 手动维护的栈，逆序压入以保持声明顺序
        let mut stack: Vec<RangeId> = top.items().iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(range) = forest.get(key) else {
                continue;
            };
            flattened.push(key);
            stack.extend(range.items().iter().rev().copied());
        }
    }

    flattened
}
