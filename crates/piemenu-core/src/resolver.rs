//! 上下文饼菜单解析
//!
//! 按注册表顺序遍历候选饼菜单，第一个规则组启用且四条比较全部成立的胜出。
//! 多个启用的规则组同时匹配时由插入顺序决定，没有额外的优先级字段。

use crate::rule::ContextRules;
use crate::selection::SelectionCounts;

/// 解析当前选择对应的上下文饼菜单
///
/// 没有候选匹配时返回 `None`，调用方回退到用户固定的当前饼菜单。
/// 全零计数照常参与比较：选中的子元素可能都不是顶点、边或面。
/// 选择本身为空时由调用方直接退出上下文模式，不调用这里。
pub fn resolve_context_pie<'a, I>(counts: &SelectionCounts, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a ContextRules)>,
{
    candidates
        .into_iter()
        .find(|(_, rules)| rules.matches(counts))
        .map(|(name, _)| name)
}
