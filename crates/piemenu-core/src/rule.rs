//! 上下文规则
//!
//! 每个饼菜单可以附带一组规则：四种拓扑类型各一条（比较运算符 + 阈值），
//! 外加一个启用标志。只有四条比较同时成立时规则组才算匹配。

use crate::selection::SelectionCounts;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 未存储过的阈值使用的哨兵默认值，用来区分"未设置"和"显式设为0"
pub const DEFAULT_THRESHOLD: u32 = 10;

/// 拓扑类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopoKind {
    Vertex,
    Edge,
    Face,
    Object,
}

impl TopoKind {
    /// 所有拓扑类型，按存储顺序排列
    pub const ALL: [TopoKind; 4] = [
        TopoKind::Vertex,
        TopoKind::Edge,
        TopoKind::Face,
        TopoKind::Object,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TopoKind::Vertex => "Vertex",
            TopoKind::Edge => "Edge",
            TopoKind::Face => "Face",
            TopoKind::Object => "Object",
        }
    }

    fn slot(self) -> usize {
        match self {
            TopoKind::Vertex => 0,
            TopoKind::Edge => 1,
            TopoKind::Face => 2,
            TopoKind::Object => 3,
        }
    }
}

impl fmt::Display for TopoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareOp {
    Less,
    LessEqual,
    #[default]
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
}

type CompareFn = fn(&u32, &u32) -> bool;

/// 运算符 -> (存储记号, 比较函数)，下标与 `CompareOp::slot` 一致
const OPERATOR_TABLE: [(&str, CompareFn); 6] = [
    ("<", u32::lt),
    ("<=", u32::le),
    ("==", u32::eq),
    ("!=", u32::ne),
    (">", u32::gt),
    (">=", u32::ge),
];

impl CompareOp {
    /// 所有运算符，按偏好设置下拉框中的顺序排列
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Less,
        CompareOp::LessEqual,
        CompareOp::Equal,
        CompareOp::NotEqual,
        CompareOp::Greater,
        CompareOp::GreaterEqual,
    ];

    fn slot(self) -> usize {
        match self {
            CompareOp::Less => 0,
            CompareOp::LessEqual => 1,
            CompareOp::Equal => 2,
            CompareOp::NotEqual => 3,
            CompareOp::Greater => 4,
            CompareOp::GreaterEqual => 5,
        }
    }

    /// 持久化时使用的记号
    pub fn token(self) -> &'static str {
        OPERATOR_TABLE[self.slot()].0
    }

    /// 解析存储记号，未知记号返回 `None`
    pub fn from_token(token: &str) -> Option<Self> {
        OPERATOR_TABLE
            .iter()
            .position(|(t, _)| *t == token)
            .map(|idx| Self::ALL[idx])
    }

    /// 计算 `lhs op rhs`
    pub fn apply(self, lhs: u32, rhs: u32) -> bool {
        (OPERATOR_TABLE[self.slot()].1)(&lhs, &rhs)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// 未识别的运算符记号
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown comparison operator: {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for CompareOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// 单条规则：`count op threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoRule {
    pub op: CompareOp,
    pub threshold: u32,
}

impl TopoRule {
    pub fn new(op: CompareOp, threshold: u32) -> Self {
        Self { op, threshold }
    }

    pub fn matches(&self, count: u32) -> bool {
        self.op.apply(count, self.threshold)
    }
}

impl Default for TopoRule {
    fn default() -> Self {
        Self {
            op: CompareOp::Equal,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// 一个饼菜单的上下文规则组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextRules {
    /// 是否启用；未启用的规则组永远不会被解析器考虑
    pub enabled: bool,

    rules: [TopoRule; 4],
}

impl ContextRules {
    /// 创建默认规则组（未启用）
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取某种拓扑类型的规则
    pub fn get(&self, kind: TopoKind) -> TopoRule {
        self.rules[kind.slot()]
    }

    /// 设置某种拓扑类型的规则
    pub fn set(&mut self, kind: TopoKind, rule: TopoRule) {
        self.rules[kind.slot()] = rule;
    }

    /// 设置规则（链式调用）
    pub fn with_rule(mut self, kind: TopoKind, rule: TopoRule) -> Self {
        self.set(kind, rule);
        self
    }

    /// 设置启用标志（链式调用）
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 按存储顺序遍历 (类型, 规则)
    pub fn iter(&self) -> impl Iterator<Item = (TopoKind, TopoRule)> + '_ {
        TopoKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// 四条比较是否全部成立（不考虑启用标志）
    pub fn all_hold(&self, counts: &SelectionCounts) -> bool {
        self.iter().all(|(kind, rule)| rule.matches(counts.get(kind)))
    }

    /// 启用且四条比较全部成立
    pub fn matches(&self, counts: &SelectionCounts) -> bool {
        self.enabled && self.all_hold(counts)
    }
}
