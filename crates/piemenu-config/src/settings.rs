//! 全局设置
//!
//! 保存在 `PieMenu` 根组中：当前饼菜单、上下文饼菜单、上下文模式开关、
//! 触发方式、触发快捷键和工具栏关联。

use crate::error::StoreError;
use crate::layout::root_path;
use crate::param::{ParamKind, ParamStore};
use piemenu_core::command::ToolbarLink;
use piemenu_core::pie::DEFAULT_PIE_NAME;

pub const KEY_CURRENT_PIE: &str = "CurrentPie";
pub const KEY_CONTEXT_PIE: &str = "ContextPie";
pub const KEY_ENABLE_CONTEXT: &str = "EnableContext";
pub const KEY_TRIGGER_MODE: &str = "TriggerMode";
pub const KEY_TRIGGER_SHORTCUT: &str = "triggerShortcut";
pub const KEY_TOOLBAR: &str = "ToolBar";

/// 旧版本遗留的键
const OBSOLETE_BOOLS: [&str; 1] = ["ContextPhase"];

/// 默认触发快捷键
pub const DEFAULT_SHORTCUT: &str = "TAB";

/// 饼菜单按钮的触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// 点击按钮触发
    #[default]
    Press,
    /// 鼠标悬停即触发
    Hover,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Press => "Press",
            TriggerMode::Hover => "Hover",
        }
    }

    /// 解析存储值，未知值按 `Press` 处理
    pub fn parse(value: &str) -> Self {
        match value {
            "Hover" => TriggerMode::Hover,
            _ => TriggerMode::Press,
        }
    }
}

/// 全局设置快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// 用户固定的当前饼菜单
    pub current_pie: String,

    /// 最近一次解析出的上下文饼菜单
    pub context_pie: Option<String>,

    /// 是否根据选择自动切换饼菜单
    pub enable_context: bool,

    pub trigger_mode: TriggerMode,

    pub trigger_shortcut: String,

    /// 直接显示某个宿主工具栏时的关联
    pub toolbar: Option<ToolbarLink>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_pie: DEFAULT_PIE_NAME.to_string(),
            context_pie: None,
            enable_context: false,
            trigger_mode: TriggerMode::Press,
            trigger_shortcut: DEFAULT_SHORTCUT.to_string(),
            toolbar: None,
        }
    }
}

impl Settings {
    /// 从存储读取
    pub fn load<S: ParamStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let root = root_path();

        let toolbar = if store.get_bool(&root, KEY_TOOLBAR)?.unwrap_or(false) {
            store
                .get_string(&root, KEY_TOOLBAR)?
                .filter(|d| !d.is_empty())
                .map(|d| ToolbarLink::parse(&d))
        } else {
            None
        };

        Ok(Self {
            current_pie: store
                .get_string(&root, KEY_CURRENT_PIE)?
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_PIE_NAME.to_string()),
            context_pie: store.get_string(&root, KEY_CONTEXT_PIE)?.filter(|s| !s.is_empty()),
            enable_context: store.get_bool(&root, KEY_ENABLE_CONTEXT)?.unwrap_or(false),
            trigger_mode: store
                .get_string(&root, KEY_TRIGGER_MODE)?
                .map(|m| TriggerMode::parse(&m))
                .unwrap_or_default(),
            trigger_shortcut: store
                .get_string(&root, KEY_TRIGGER_SHORTCUT)?
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SHORTCUT.to_string()),
            toolbar,
        })
    }
}

pub fn write_current_pie<S: ParamStore + ?Sized>(store: &mut S, name: &str) -> Result<(), StoreError> {
    store.set_string(&root_path(), KEY_CURRENT_PIE, name)
}

pub fn write_context_pie<S: ParamStore + ?Sized>(store: &mut S, name: Option<&str>) -> Result<(), StoreError> {
    match name {
        Some(name) => store.set_string(&root_path(), KEY_CONTEXT_PIE, name),
        None => store.remove(&root_path(), ParamKind::String, KEY_CONTEXT_PIE),
    }
}

pub fn write_enable_context<S: ParamStore + ?Sized>(store: &mut S, enabled: bool) -> Result<(), StoreError> {
    store.set_bool(&root_path(), KEY_ENABLE_CONTEXT, enabled)
}

pub fn write_trigger_mode<S: ParamStore + ?Sized>(store: &mut S, mode: TriggerMode) -> Result<(), StoreError> {
    store.set_string(&root_path(), KEY_TRIGGER_MODE, mode.as_str())
}

pub fn write_trigger_shortcut<S: ParamStore + ?Sized>(store: &mut S, shortcut: &str) -> Result<(), StoreError> {
    store.set_string(&root_path(), KEY_TRIGGER_SHORTCUT, shortcut)
}

/// 写入或清除工具栏关联；布尔键和字符串键同名但互不影响
pub fn write_toolbar_link<S: ParamStore + ?Sized>(
    store: &mut S,
    link: Option<&ToolbarLink>,
) -> Result<(), StoreError> {
    let root = root_path();
    match link {
        Some(link) => {
            store.set_bool(&root, KEY_TOOLBAR, true)?;
            store.set_string(&root, KEY_TOOLBAR, &link.to_string())
        }
        None => {
            store.set_bool(&root, KEY_TOOLBAR, false)?;
            store.remove(&root, ParamKind::String, KEY_TOOLBAR)
        }
    }
}

/// 删除旧版本遗留的参数
pub fn remove_obsolete<S: ParamStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    for key in OBSOLETE_BOOLS {
        store.remove(&root_path(), ParamKind::Bool, key)?;
    }
    Ok(())
}
