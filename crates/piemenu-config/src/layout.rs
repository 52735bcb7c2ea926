//! 持久化布局
//!
//! 饼菜单在参数存储中的组织方式：
//!
//! ```text
//! PieMenu/Index/IndexList           "0.,.1.,.3"
//! PieMenu/Index/<n>                 饼菜单名称（字符串键）
//! PieMenu/Index/<n>/ToolList        命令列表，以 ".,." 连接
//! PieMenu/Index/<n>/Radius, Button
//! PieMenu/Index/<n>/Context/Enabled
//! PieMenu/Index/<n>/Context/{Kind}Sign, {Kind}Value
//! ```
//!
//! 读取时发现的损坏会就地修复并记录到 `issues`。

use crate::error::{ConfigError, StoreError};
use crate::param::{ParamKind, ParamPath, ParamStore};
use piemenu_core::pie::{Pie, PieId, DEFAULT_BUTTON_SIZE, DEFAULT_RADIUS};
use piemenu_core::rule::{CompareOp, ContextRules, TopoKind, TopoRule, UnknownOperator, DEFAULT_THRESHOLD};
use tracing::warn;

pub const ROOT_GROUP: &str = "PieMenu";
pub const INDEX_GROUP: &str = "Index";
pub const CONTEXT_GROUP: &str = "Context";

pub const KEY_INDEX_LIST: &str = "IndexList";
pub const KEY_TOOL_LIST: &str = "ToolList";
pub const KEY_RADIUS: &str = "Radius";
pub const KEY_BUTTON: &str = "Button";
pub const KEY_ENABLED: &str = "Enabled";

/// 列表分隔符
pub const LIST_SEPARATOR: &str = ".,.";

pub fn root_path() -> ParamPath {
    ParamPath::new([ROOT_GROUP])
}

pub fn index_path() -> ParamPath {
    root_path().join(INDEX_GROUP)
}

pub fn pie_path(id: PieId) -> ParamPath {
    index_path().join(id.to_string())
}

pub fn context_path(id: PieId) -> ParamPath {
    pie_path(id).join(CONTEXT_GROUP)
}

pub fn sign_key(kind: TopoKind) -> String {
    format!("{}Sign", kind.name())
}

pub fn value_key(kind: TopoKind) -> String {
    format!("{}Value", kind.name())
}

/// 拆分以 ".,." 连接的列表，空字符串得到空列表
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(LIST_SEPARATOR).map(str::to_string).collect()
    }
}

pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// 解析索引列表，无效和重复的项被跳过并记录
pub fn parse_index_list(raw: &str, issues: &mut Vec<ConfigError>) -> Vec<PieId> {
    let mut ids: Vec<PieId> = Vec::new();

    for token in split_list(raw) {
        match token.trim().parse::<u32>() {
            Ok(n) if !ids.contains(&PieId(n)) => ids.push(PieId(n)),
            _ => issues.push(ConfigError::InvalidIndex(token)),
        }
    }

    ids
}

pub fn format_index_list(ids: &[PieId]) -> String {
    join_list(ids.iter().map(|id| id.to_string()))
}

pub fn read_index_list<S: ParamStore + ?Sized>(
    store: &S,
    issues: &mut Vec<ConfigError>,
) -> Result<Vec<PieId>, StoreError> {
    let raw = store.get_string(&index_path(), KEY_INDEX_LIST)?.unwrap_or_default();
    Ok(parse_index_list(&raw, issues))
}

pub fn write_index_list<S: ParamStore + ?Sized>(store: &mut S, ids: &[PieId]) -> Result<(), StoreError> {
    store.set_string(&index_path(), KEY_INDEX_LIST, &format_index_list(ids))
}

pub fn read_pie_name<S: ParamStore + ?Sized>(store: &S, id: PieId) -> Result<Option<String>, StoreError> {
    Ok(store
        .get_string(&index_path(), &id.to_string())?
        .filter(|name| !name.is_empty()))
}

pub fn write_pie_name<S: ParamStore + ?Sized>(store: &mut S, id: PieId, name: &str) -> Result<(), StoreError> {
    store.set_string(&index_path(), &id.to_string(), name)
}

pub fn write_tools<S: ParamStore + ?Sized>(store: &mut S, id: PieId, tools: &[String]) -> Result<(), StoreError> {
    store.set_string(&pie_path(id), KEY_TOOL_LIST, &join_list(tools))
}

/// 读取正整数设置；缺失或为0时写回默认值
fn read_size<S: ParamStore + ?Sized>(
    store: &mut S,
    id: PieId,
    key: &str,
    default: u32,
    pie: &str,
    issues: &mut Vec<ConfigError>,
) -> Result<u32, StoreError> {
    let group = pie_path(id);
    let value = match store.get_int(&group, key)? {
        Some(v) if v > 0 => return Ok(u32::try_from(v).unwrap_or(u32::MAX)),
        Some(v) if v < 0 => {
            let issue = ConfigError::NegativeValue {
                pie: pie.to_string(),
                key: key.to_string(),
                value: v,
            };
            warn!("{}", issue);
            issues.push(issue);
            default
        }
        _ => default,
    };

    store.set_int(&group, key, i64::from(value))?;
    Ok(value)
}

/// 读取上下文规则组
///
/// 规则组只在 `Context` 组里有任何键时才存在。已存在的规则组中，
/// 缺失的运算符按 "==" 补齐，缺失的阈值按哨兵默认值补齐；
/// 无法识别的运算符改为 "==" 并写回。
pub fn read_context_rules<S: ParamStore + ?Sized>(
    store: &mut S,
    id: PieId,
    pie: &str,
    issues: &mut Vec<ConfigError>,
) -> Result<Option<ContextRules>, StoreError> {
    let group = context_path(id);

    let has_keys = !store.keys(&group, ParamKind::Bool)?.is_empty()
        || !store.keys(&group, ParamKind::String)?.is_empty()
        || !store.keys(&group, ParamKind::Int)?.is_empty();
    if !has_keys {
        return Ok(None);
    }

    let mut rules = ContextRules::new();
    rules.enabled = store.get_bool(&group, KEY_ENABLED)?.unwrap_or(false);

    let mut dirty = false;
    for kind in TopoKind::ALL {
        let op = match store.get_string(&group, &sign_key(kind))? {
            Some(token) => match token.parse::<CompareOp>() {
                Ok(op) => op,
                Err(UnknownOperator(token)) => {
                    let issue = ConfigError::UnknownOperator {
                        pie: pie.to_string(),
                        key: sign_key(kind),
                        token,
                    };
                    warn!("{}", issue);
                    issues.push(issue);
                    dirty = true;
                    CompareOp::Equal
                }
            },
            None => {
                dirty = true;
                CompareOp::Equal
            }
        };

        let threshold = match store.get_int(&group, &value_key(kind))? {
            Some(v) if v >= 0 => u32::try_from(v).unwrap_or(u32::MAX),
            Some(v) => {
                let issue = ConfigError::NegativeValue {
                    pie: pie.to_string(),
                    key: value_key(kind),
                    value: v,
                };
                warn!("{}", issue);
                issues.push(issue);
                dirty = true;
                0
            }
            None => {
                dirty = true;
                DEFAULT_THRESHOLD
            }
        };

        rules.set(kind, TopoRule::new(op, threshold));
    }

    if dirty {
        write_context_rules(store, id, &rules)?;
    }

    Ok(Some(rules))
}

/// 写入完整的上下文规则组
pub fn write_context_rules<S: ParamStore + ?Sized>(
    store: &mut S,
    id: PieId,
    rules: &ContextRules,
) -> Result<(), StoreError> {
    let group = context_path(id);

    store.set_bool(&group, KEY_ENABLED, rules.enabled)?;
    for (kind, rule) in rules.iter() {
        store.set_string(&group, &sign_key(kind), rule.op.token())?;
        store.set_int(&group, &value_key(kind), i64::from(rule.threshold))?;
    }

    Ok(())
}

pub fn remove_context_rules<S: ParamStore + ?Sized>(store: &mut S, id: PieId) -> Result<(), StoreError> {
    store.remove_group(&context_path(id))
}

/// 读取一个饼菜单的全部设置
pub fn read_pie<S: ParamStore + ?Sized>(
    store: &mut S,
    id: PieId,
    name: String,
    issues: &mut Vec<ConfigError>,
) -> Result<Pie, StoreError> {
    let tools = store
        .get_string(&pie_path(id), KEY_TOOL_LIST)?
        .map(|raw| split_list(&raw))
        .unwrap_or_default();
    let radius = read_size(store, id, KEY_RADIUS, DEFAULT_RADIUS, &name, issues)?;
    let button_size = read_size(store, id, KEY_BUTTON, DEFAULT_BUTTON_SIZE, &name, issues)?;
    let context = read_context_rules(store, id, &name, issues)?;

    Ok(Pie {
        name,
        tools,
        radius,
        button_size,
        context,
    })
}

/// 写入一个饼菜单的全部设置（包括索引组中的名称）
pub fn write_pie<S: ParamStore + ?Sized>(store: &mut S, id: PieId, pie: &Pie) -> Result<(), StoreError> {
    write_pie_name(store, id, &pie.name)?;

    let group = pie_path(id);
    store.set_string(&group, KEY_TOOL_LIST, &join_list(&pie.tools))?;
    store.set_int(&group, KEY_RADIUS, i64::from(pie.radius))?;
    store.set_int(&group, KEY_BUTTON, i64::from(pie.button_size))?;

    remove_context_rules(store, id)?;
    if let Some(rules) = &pie.context {
        write_context_rules(store, id, rules)?;
    }

    Ok(())
}

/// 删除饼菜单的名称和设置组
pub fn remove_pie<S: ParamStore + ?Sized>(store: &mut S, id: PieId) -> Result<(), StoreError> {
    store.remove(&index_path(), ParamKind::String, &id.to_string())?;
    store.remove_group(&pie_path(id))
}
