//! 饼菜单核心
//!
//! 提供上下文规则、选择计数和上下文饼菜单解析，不涉及任何I/O。
//!
//! # 架构设计
//!
//! - `TopoKind`: 拓扑类型（顶点、边、面、对象）
//! - `ContextRules`: 每个饼菜单的四条阈值规则和启用标志
//! - `SelectionCounts`: 当前选择的四个计数
//! - `resolve_context_pie`: 按注册表顺序找到第一个完全匹配的饼菜单
//!
//! # 示例
//!
//! ```rust
//! use piemenu_core::prelude::*;
//!
//! let mut rules = ContextRules::new();
//! rules.enabled = true;
//! rules.set(TopoKind::Vertex, TopoRule::new(CompareOp::Equal, 0));
//! rules.set(TopoKind::Edge, TopoRule::new(CompareOp::Greater, 0));
//! rules.set(TopoKind::Face, TopoRule::new(CompareOp::Equal, 0));
//! rules.set(TopoKind::Object, TopoRule::new(CompareOp::Equal, 0));
//!
//! let counts = SelectionCounts::new(0, 3, 0, 0);
//! let winner = resolve_context_pie(&counts, [("EdgeMode", &rules)]);
//! assert_eq!(winner, Some("EdgeMode"));
//! ```

pub mod command;
pub mod pie;
pub mod resolver;
pub mod rule;
pub mod selection;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::command::{workbench_module, workbench_of, ToolbarLink};
    pub use crate::pie::{MoveDirection, Pie, PieId, DEFAULT_PIE_NAME, DEFAULT_TOOLS};
    pub use crate::resolver::resolve_context_pie;
    pub use crate::rule::{CompareOp, ContextRules, TopoKind, TopoRule};
    pub use crate::selection::{SelectedItem, SelectionCounts};
}
