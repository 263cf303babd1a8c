//! Range解析器模块
//!
//! 将清单 `structures` 中的原始声明解析为 [`RangeForest`]。
//!
//! 声明之间可以通过标识符相互引用（而不是嵌套），引用总是针对完整的声明列表解析，
//! 因此与声明的先后顺序无关。解析尽力而为：无法解析的引用、结构不完整的声明
//! 只会记录为 [`ParseIssue`]，不会中断整个森林的构建。
//!
//! 文档的形状由发布者决定，所以遍历使用显式的工作栈而不是递归，
//! 并受 [`ManifestOptions`] 中的深度和数量上限约束。

use std::collections::HashSet;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::manifest::config::ManifestOptions;
use crate::manifest::error::ParseIssue;
use crate::manifest::range::declaration::{self, Children, ItemKind};
use crate::manifest::range::entity::{RangeForest, RangeId};

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedRanges {
    /// 构建出的 range 森林
    pub forest: RangeForest,
    /// 解析过程中记录的非致命问题，按发现顺序排列
    pub issues: Vec<ParseIssue>,
}

/// 工作栈中的任务
enum Task<'a> {
    /// 解析一个 range 声明（或对声明的引用）
    Range {
        node: &'a Value,
        path: String,
        parent: Option<RangeId>,
        depth: usize,
    },
    /// 把 canvas 子项记到所属 range 上
    Canvas {
        item: &'a Value,
        key: RangeId,
        path: String,
    },
    /// 声明的全部子项处理完毕，离开当前分支
    Leave(*const Value),
}

/// Range解析器
pub struct RangeParser<'a> {
    declarations: &'a [Value],
    options: Rc<ManifestOptions>,
    forest: RangeForest,
    issues: Vec<ParseIssue>,
    stack: Vec<Task<'a>>,
    /// 当前分支上正在展开的声明（按身份），用于发现循环引用
    lineage: HashSet<*const Value>,
    /// 是否已经达到 range 数量上限
    exhausted: bool,
}

impl<'a> RangeParser<'a> {
    /// 创建解析器
    ///
    /// # 参数
    /// * `declarations` - 清单 `structures` 字段中的全部声明
    /// * `options` - 传递给每个 range 的清单选项
    pub fn new(declarations: &'a [Value], options: Rc<ManifestOptions>) -> Self {
        Self {
            declarations,
            options,
            forest: RangeForest::new(),
            issues: Vec::new(),
            stack: Vec::new(),
            lineage: HashSet::new(),
            exhausted: false,
        }
    }

    /// 解析全部声明
    ///
    /// 顶层 range 是所有 `viewingHint` 为 `top` 的声明；如果一个都没有，
    /// 则生成一个没有标识符的包装节点，把全部声明作为它的子节点。
    pub fn parse(mut self) -> ParsedRanges {
        if self.declarations.is_empty() {
            return ParsedRanges::default();
        }

        let declarations = self.declarations;
        let tops: Vec<&'a Value> = declarations
            .iter()
            .filter(|node| declaration::is_top(node))
            .collect();

        if tops.is_empty() {
            let wrapper = self
                .forest
                .insert(None, "0".to_string(), None, None, self.options.clone());
            self.schedule_legacy(declarations, wrapper, "0", 1);
        } else {
            for (index, top) in tops.into_iter().enumerate().rev() {
                self.stack.push(Task::Range {
                    node: top,
                    path: index.to_string(),
                    parent: None,
                    depth: 0,
                });
            }
        }

        while let Some(task) = self.stack.pop() {
            match task {
                Task::Range {
                    node,
                    path,
                    parent,
                    depth,
                } => self.visit(node, path, parent, depth),
                Task::Canvas { item, key, path } => self.collect_canvas(item, key, path),
                Task::Leave(node) => {
                    self.lineage.remove(&node);
                }
            }
        }

        debug!(
            "解析完成: {} 个range, {} 个问题",
            self.forest.len(),
            self.issues.len()
        );

        ParsedRanges {
            forest: self.forest,
            issues: self.issues,
        }
    }

    /// 解析单个节点，并把它的子项压入工作栈
    ///
    /// 字符串节点是对其他声明的引用，会先在完整的声明列表中查找。
    fn visit(&mut self, node: &'a Value, path: String, parent: Option<RangeId>, depth: usize) {
        let node = match node {
            Value::String(reference) => {
                let Some(resolved) = declaration::find_by_id(self.declarations, reference) else {
                    warn!("Range: {} 不存在", reference);
                    self.issues.push(ParseIssue::UnresolvedReference {
                        id: reference.clone(),
                    });
                    return;
                };

                if self.lineage.contains(&(resolved as *const Value)) {
                    warn!("Range: {} 在路径 {} 处形成循环引用", reference, path);
                    self.issues.push(ParseIssue::CyclicReference {
                        id: reference.clone(),
                        path,
                    });
                    return;
                }

                resolved
            }
            Value::Null => {
                debug!("路径 {} 处的声明为空，已跳过", path);
                self.issues.push(ParseIssue::MalformedStructure { path });
                return;
            }
            other => other,
        };

        if depth > self.options.max_range_depth {
            warn!(
                "路径 {} 处超过最大嵌套深度 {}，已放弃该分支",
                path, self.options.max_range_depth
            );
            self.issues.push(ParseIssue::DepthLimitExceeded { path });
            return;
        }

        if self.forest.len() >= self.options.max_ranges {
            if !self.exhausted {
                warn!("range数量达到上限 {}，其余分支被放弃", self.options.max_ranges);
                self.issues.push(ParseIssue::RangeLimitExceeded {
                    limit: self.options.max_ranges,
                });
                self.exhausted = true;
            }
            return;
        }

        let id = declaration::id_of(node);
        let label = node
            .get("label")
            .and_then(|label| declaration::label_for_locale(label, &self.options.locale));

        let key = self.forest.insert(
            id.map(str::to_string),
            path.clone(),
            label,
            parent,
            self.options.clone(),
        );

        let identity = node as *const Value;
        self.lineage.insert(identity);
        self.stack.push(Task::Leave(identity));

        match declaration::children_of(node) {
            Children::Tagged(Value::Array(items)) => {
                self.schedule_tagged(items, key, &path, depth + 1)
            }
            Children::Legacy(Value::Array(ranges)) => {
                self.schedule_legacy(ranges, key, &path, depth + 1)
            }
            Children::Tagged(_) | Children::Legacy(_) | Children::None => {
                debug!("路径 {} 处的声明没有可用的子项字段，按叶子节点处理", path);
                self.issues.push(ParseIssue::MalformedStructure { path });
            }
        }
    }

    /// 带类型标签的子项（`items` / `members`），逆序压栈以保持声明顺序
    fn schedule_tagged(&mut self, items: &'a [Value], key: RangeId, path: &str, depth: usize) {
        for (index, item) in items.iter().enumerate().rev() {
            let path = format!("{}/{}", path, index);
            match ItemKind::of(item) {
                ItemKind::Range => self.stack.push(Task::Range {
                    node: item,
                    path,
                    parent: Some(key),
                    depth,
                }),
                ItemKind::Canvas => self.stack.push(Task::Canvas { item, key, path }),
                ItemKind::Other => {}
            }
        }
    }

    /// 旧方言的 `ranges`，每一项都按 range 处理
    fn schedule_legacy(&mut self, ranges: &'a [Value], key: RangeId, path: &str, depth: usize) {
        for (index, range) in ranges.iter().enumerate().rev() {
            self.stack.push(Task::Range {
                node: range,
                path: format!("{}/{}", path, index),
                parent: Some(key),
                depth,
            });
        }
    }

    fn collect_canvas(&mut self, item: &'a Value, key: RangeId, path: String) {
        match declaration::id_of(item) {
            Some(canvas_id) => self.forest.push_canvas(key, canvas_id.to_string()),
            None => {
                warn!("路径 {} 处的 canvas 缺少标识符", path);
                self.issues.push(ParseIssue::MissingCanvasId { path });
            }
        }
    }
}

/// 便捷函数：解析声明列表
pub fn parse_ranges(declarations: &[Value], options: Rc<ManifestOptions>) -> ParsedRanges {
    RangeParser::new(declarations, options).parse()
}
