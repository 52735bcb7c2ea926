//! 内存参数存储
//!
//! 参数树常驻内存，可以整体保存为 JSON 文件或从中加载。

use crate::error::StoreError;
use crate::param::{ParamKind, ParamPath, ParamStore, ParamValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 参数组
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamGroup {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    strings: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    ints: BTreeMap<String, i64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    bools: BTreeMap<String, bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    groups: BTreeMap<String, ParamGroup>,
}

impl ParamGroup {
    fn get(&self, kind: ParamKind, key: &str) -> Option<ParamValue> {
        match kind {
            ParamKind::String => self.strings.get(key).cloned().map(ParamValue::String),
            ParamKind::Int => self.ints.get(key).copied().map(ParamValue::Int),
            ParamKind::Bool => self.bools.get(key).copied().map(ParamValue::Bool),
        }
    }

    fn set(&mut self, key: &str, value: ParamValue) {
        let key = key.to_string();
        match value {
            ParamValue::String(s) => {
                self.strings.insert(key, s);
            }
            ParamValue::Int(i) => {
                self.ints.insert(key, i);
            }
            ParamValue::Bool(b) => {
                self.bools.insert(key, b);
            }
        }
    }

    fn remove(&mut self, kind: ParamKind, key: &str) {
        match kind {
            ParamKind::String => {
                self.strings.remove(key);
            }
            ParamKind::Int => {
                self.ints.remove(key);
            }
            ParamKind::Bool => {
                self.bools.remove(key);
            }
        }
    }

    fn keys(&self, kind: ParamKind) -> Vec<String> {
        match kind {
            ParamKind::String => self.strings.keys().cloned().collect(),
            ParamKind::Int => self.ints.keys().cloned().collect(),
            ParamKind::Bool => self.bools.keys().cloned().collect(),
        }
    }
}

/// 内存参数存储，可选地关联一个 JSON 文件
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    root: ParamGroup,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载；文件不存在时返回关联该路径的空存储
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let root = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            let root = serde_json::from_str(&text)?;
            info!("Loaded parameters from: {}", path.display());
            root
        } else {
            debug!("No parameter file at {}, starting empty", path.display());
            ParamGroup::default()
        };

        Ok(Self {
            root,
            path: Some(path),
        })
    }

    /// 保存到关联的文件；没有关联文件时什么也不做
    pub fn save(&self) -> Result<(), StoreError> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    /// 保存到指定文件
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Saved parameters to: {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self {
            root: serde_json::from_str(json)?,
            path: None,
        })
    }

    fn group(&self, path: &ParamPath) -> Option<&ParamGroup> {
        let mut group = &self.root;
        for segment in path.segments() {
            group = group.groups.get(segment)?;
        }
        Some(group)
    }

    fn group_mut(&mut self, path: &ParamPath) -> &mut ParamGroup {
        let mut group = &mut self.root;
        for segment in path.segments() {
            group = group.groups.entry(segment.clone()).or_default();
        }
        group
    }
}

impl ParamStore for MemoryStore {
    fn get(&self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<Option<ParamValue>, StoreError> {
        Ok(self.group(group).and_then(|g| g.get(kind, key)))
    }

    fn set(&mut self, group: &ParamPath, key: &str, value: ParamValue) -> Result<(), StoreError> {
        self.group_mut(group).set(key, value);
        Ok(())
    }

    fn remove(&mut self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<(), StoreError> {
        if self.group(group).is_some() {
            self.group_mut(group).remove(kind, key);
        }
        Ok(())
    }

    fn remove_group(&mut self, group: &ParamPath) -> Result<(), StoreError> {
        match group.segments().split_last() {
            None => self.root = ParamGroup::default(),
            Some((last, parent)) => {
                let parent = ParamPath::new(parent.iter().cloned());
                if self.group(&parent).is_some() {
                    self.group_mut(&parent).groups.remove(last);
                }
            }
        }
        Ok(())
    }

    fn keys(&self, group: &ParamPath, kind: ParamKind) -> Result<Vec<String>, StoreError> {
        Ok(self.group(group).map(|g| g.keys(kind)).unwrap_or_default())
    }

    fn groups(&self, group: &ParamPath) -> Result<Vec<String>, StoreError> {
        Ok(self
            .group(group)
            .map(|g| g.groups.keys().cloned().collect())
            .unwrap_or_default())
    }
}
