//! 分层键值参数存储接口
//!
//! 参数按组组织，组可以嵌套；每个组内字符串、整数、布尔三种类型的键
//! 各自独立，同名的字符串键和布尔键互不影响。

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 组路径，例如 `PieMenu/Index/3/Context`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamPath {
    segments: Vec<String>,
}

impl ParamPath {
    /// 根组
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// 解析以 `/` 分隔的路径
    pub fn parse(path: &str) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }

    /// 子组路径
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    String,
    Int,
    Bool,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
        }
    }
}

/// 参数值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Bool(_) => ParamKind::Bool,
        }
    }

    /// 编码为文本（SQLite 后端使用）
    pub fn encode(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
        }
    }

    /// 从文本解码
    pub fn decode(kind: ParamKind, key: &str, text: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidValue {
            key: key.to_string(),
            value: text.to_string(),
        };

        match kind {
            ParamKind::String => Ok(ParamValue::String(text.to_string())),
            ParamKind::Int => text.parse().map(ParamValue::Int).map_err(|_| invalid()),
            ParamKind::Bool => match text {
                "1" | "true" => Ok(ParamValue::Bool(true)),
                "0" | "false" => Ok(ParamValue::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }
}

/// 参数存储
///
/// 读取不存在的组不会创建它；写入时自动创建路径上的所有组。
pub trait ParamStore {
    fn get(&self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<Option<ParamValue>, StoreError>;

    fn set(&mut self, group: &ParamPath, key: &str, value: ParamValue) -> Result<(), StoreError>;

    fn remove(&mut self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<(), StoreError>;

    /// 删除组及其所有子组
    fn remove_group(&mut self, group: &ParamPath) -> Result<(), StoreError>;

    /// 列出组内某类型的所有键
    fn keys(&self, group: &ParamPath, kind: ParamKind) -> Result<Vec<String>, StoreError>;

    /// 列出直接子组的名称
    fn groups(&self, group: &ParamPath) -> Result<Vec<String>, StoreError>;

    fn get_string(&self, group: &ParamPath, key: &str) -> Result<Option<String>, StoreError> {
        Ok(match self.get(group, ParamKind::String, key)? {
            Some(ParamValue::String(s)) => Some(s),
            _ => None,
        })
    }

    fn set_string(&mut self, group: &ParamPath, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(group, key, ParamValue::String(value.to_string()))
    }

    fn get_int(&self, group: &ParamPath, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(match self.get(group, ParamKind::Int, key)? {
            Some(ParamValue::Int(i)) => Some(i),
            _ => None,
        })
    }

    fn set_int(&mut self, group: &ParamPath, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(group, key, ParamValue::Int(value))
    }

    fn get_bool(&self, group: &ParamPath, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(match self.get(group, ParamKind::Bool, key)? {
            Some(ParamValue::Bool(b)) => Some(b),
            _ => None,
        })
    }

    fn set_bool(&mut self, group: &ParamPath, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(group, key, ParamValue::Bool(value))
    }
}

impl<S: ParamStore + ?Sized> ParamStore for &mut S {
    fn get(&self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<Option<ParamValue>, StoreError> {
        (**self).get(group, kind, key)
    }

    fn set(&mut self, group: &ParamPath, key: &str, value: ParamValue) -> Result<(), StoreError> {
        (**self).set(group, key, value)
    }

    fn remove(&mut self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<(), StoreError> {
        (**self).remove(group, kind, key)
    }

    fn remove_group(&mut self, group: &ParamPath) -> Result<(), StoreError> {
        (**self).remove_group(group)
    }

    fn keys(&self, group: &ParamPath, kind: ParamKind) -> Result<Vec<String>, StoreError> {
        (**self).keys(group, kind)
    }

    fn groups(&self, group: &ParamPath) -> Result<Vec<String>, StoreError> {
        (**self).groups(group)
    }
}
