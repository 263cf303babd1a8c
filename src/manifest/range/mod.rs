//! Range（结构/目录）解析模块
//!
//! 此模块把清单 `structures` 中的声明解析为 range 森林，并提供平铺索引和查找功能。

pub mod declaration;
pub mod entity;
mod index;
pub mod parser;

pub use declaration::{ItemKind, label_for_locale};
pub use entity::{Range, RangeForest, RangeId};
pub(crate) use index::RangeIndex;
pub use parser::{ParsedRanges, RangeParser, parse_ranges};
