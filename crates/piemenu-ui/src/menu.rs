//! 饼菜单内容
//!
//! 决定下一次弹出显示什么：上下文饼菜单、关联的工具栏，或者用户固定的饼菜单。

use crate::catalog::{resolve_tool_list, resolve_toolbar, CommandAction, CommandCatalog};
use crate::state::MenuState;
use piemenu_config::{ParamStore, PieRegistry};
use piemenu_core::command::ToolbarLink;
use piemenu_core::pie::{DEFAULT_BUTTON_SIZE, DEFAULT_PIE_NAME, DEFAULT_RADIUS};

/// 命令来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    /// 选择命中的上下文饼菜单
    Context(String),
    /// 关联的宿主工具栏
    Toolbar(ToolbarLink),
    /// 用户固定的饼菜单
    Pinned(String),
}

/// 一次弹出的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContent {
    pub source: MenuSource,
    pub commands: Vec<CommandAction>,
    pub radius: u32,
    pub button_size: u32,
}

/// 当前应显示的命令来源
pub fn active_source<S: ParamStore>(registry: &PieRegistry<S>, state: &MenuState) -> MenuSource {
    let settings = registry.settings();

    if state.context_phase && settings.enable_context {
        if let Some(pie) = registry.context_pie() {
            return MenuSource::Context(pie.name.clone());
        }
    }

    if let Some(link) = &settings.toolbar {
        return MenuSource::Toolbar(link.clone());
    }

    let name = registry
        .current_pie()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| DEFAULT_PIE_NAME.to_string());
    MenuSource::Pinned(name)
}

/// 当前应显示的饼菜单名；显示工具栏时为 `None`
pub fn active_pie_name<S: ParamStore>(registry: &PieRegistry<S>, state: &MenuState) -> Option<String> {
    match active_source(registry, state) {
        MenuSource::Context(name) | MenuSource::Pinned(name) => Some(name),
        MenuSource::Toolbar(_) => None,
    }
}

/// 准备弹出内容，必要时激活工作台以加载命令
pub fn prepare_menu<S, C>(registry: &PieRegistry<S>, catalog: &mut C, state: &MenuState) -> MenuContent
where
    S: ParamStore,
    C: CommandCatalog + ?Sized,
{
    let source = active_source(registry, state);

    let (commands, radius, button_size) = match &source {
        MenuSource::Toolbar(link) => (resolve_toolbar(catalog, link), DEFAULT_RADIUS, DEFAULT_BUTTON_SIZE),
        MenuSource::Context(name) | MenuSource::Pinned(name) => match registry.get(name) {
            Some(pie) => (resolve_tool_list(catalog, &pie.tools), pie.radius, pie.button_size),
            None => (Vec::new(), DEFAULT_RADIUS, DEFAULT_BUTTON_SIZE),
        },
    };

    MenuContent {
        source,
        commands,
        radius,
        button_size,
    }
}
