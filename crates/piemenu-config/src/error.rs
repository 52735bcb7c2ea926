//! 配置错误定义

use thiserror::Error;

/// 存储后端错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// 加载时发现并已就地修复的配置损坏
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown operator {token:?} for {key} of pie {pie:?}, using \"==\"")]
    UnknownOperator { pie: String, key: String, token: String },

    #[error("Index {0} is listed but has no pie name")]
    MissingGroup(u32),

    #[error("Invalid index list entry: {0:?}")]
    InvalidIndex(String),

    #[error("Duplicate pie name {name:?} at index {index}")]
    DuplicateEntry { name: String, index: u32 },

    #[error("Negative value {value} for {key} of pie {pie:?} replaced")]
    NegativeValue { pie: String, key: String, value: i64 },
}

/// 饼菜单注册表错误
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Pie already exists: {0}")]
    DuplicateName(String),

    #[error("Pie name must not be empty")]
    EmptyName,

    #[error("Pie not found: {0}")]
    NotFound(String),

    #[error("Registry is full ({0} pies)")]
    RegistryFull(usize),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// 名称输入被拒绝，调用方应重新提示用户输入
    pub fn is_name_rejection(&self) -> bool {
        matches!(self, RegistryError::DuplicateName(_) | RegistryError::EmptyName)
    }
}
