//! 命令目录
//!
//! 宿主动作的只读视图，加上工作台激活。命令标识符在这里被解析成
//! 可以放到饼菜单按钮上的动作。

use piemenu_core::command::{workbench_class, workbench_module, workbench_of, ToolbarLink};
use std::collections::HashMap;
use tracing::debug;

/// 宿主动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAction {
    /// 命令标识符，例如 "Part_Box"
    pub id: String,

    /// 显示文本
    pub label: String,

    /// 是否有图标；没有图标的动作不能放到饼菜单上
    pub has_icon: bool,
}

impl CommandAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            has_icon: true,
        }
    }

    pub fn without_icon(mut self) -> Self {
        self.has_icon = false;
        self
    }

    /// 可以放到饼菜单上
    pub fn is_usable(&self) -> bool {
        self.has_icon && !self.id.is_empty()
    }
}

/// 宿主命令目录
pub trait CommandCatalog {
    /// 当前加载的所有动作
    fn actions(&self) -> Vec<CommandAction>;

    /// 有命令的工具栏名，按宿主顺序
    fn toolbars(&self) -> Vec<String>;

    /// 工具栏中的动作（不含分隔符）
    fn toolbar_actions(&self, toolbar: &str) -> Vec<CommandAction>;

    /// 当前工作台的类名
    fn active_workbench(&self) -> String;

    /// 按类名激活工作台，会加载该工作台的命令
    fn activate_workbench(&mut self, class: &str);
}

/// 按标识符索引的动作表
///
/// 没有图标或标识符为空的动作被排除；宿主中出现多次的标识符有歧义，
/// 整个丢弃。
pub fn action_map<I>(actions: I) -> HashMap<String, CommandAction>
where
    I: IntoIterator<Item = CommandAction>,
{
    let mut map: HashMap<String, CommandAction> = HashMap::new();
    let mut duplicates: Vec<String> = Vec::new();

    for action in actions.into_iter().filter(CommandAction::is_usable) {
        if map.contains_key(&action.id) {
            if !duplicates.contains(&action.id) {
                duplicates.push(action.id.clone());
            }
        } else {
            map.insert(action.id.clone(), action);
        }
    }

    for id in &duplicates {
        debug!("Dropping ambiguous command id {:?}", id);
        map.remove(id);
    }

    map
}

/// 把命令列表解析为动作
///
/// 空位置跳过；未知的 `Std_` 命令跳过；其他未知命令激活所属工作台后
/// 重新查找，每个工作台只激活一次。结束后恢复原来的工作台。
pub fn resolve_tool_list<C>(catalog: &mut C, tools: &[String]) -> Vec<CommandAction>
where
    C: CommandCatalog + ?Sized,
{
    let last_workbench = catalog.active_workbench();
    let mut activated: Vec<String> = Vec::new();

    let resolved = loop {
        let map = action_map(catalog.actions());
        let mut resolved: Vec<CommandAction> = Vec::new();
        let mut pending: Option<String> = None;

        for id in tools.iter().filter(|id| !id.is_empty()) {
            if let Some(action) = map.get(id) {
                if !resolved.contains(action) {
                    resolved.push(action.clone());
                }
                continue;
            }

            match workbench_module(workbench_of(id)) {
                Some(module) if !activated.contains(&module) => {
                    pending = Some(module);
                    break;
                }
                Some(_) => debug!("Command {:?} not found after loading its workbench", id),
                None => debug!("Skipping unknown command {:?}", id),
            }
        }

        match pending {
            Some(module) => {
                debug!("Loading workbench {} for pie commands", module);
                catalog.activate_workbench(&workbench_class(&module));
                activated.push(module);
            }
            None => break resolved,
        }
    };

    if !activated.is_empty() {
        catalog.activate_workbench(&last_workbench);
    }

    resolved
}

/// 工具栏中可用命令的标识符，去重
pub fn toolbar_commands<C>(catalog: &C, toolbar: &str) -> Vec<String>
where
    C: CommandCatalog + ?Sized,
{
    let mut commands: Vec<String> = Vec::new();
    for action in catalog.toolbar_actions(toolbar) {
        if action.is_usable() && !commands.contains(&action.id) {
            commands.push(action.id);
        }
    }
    commands
}

/// 为工具栏创建关联，记录其命令所属的工作台
pub fn toolbar_link<C>(catalog: &C, toolbar: &str) -> ToolbarLink
where
    C: CommandCatalog + ?Sized,
{
    let actions: Vec<CommandAction> = catalog
        .toolbar_actions(toolbar)
        .into_iter()
        .filter(|a| a.has_icon)
        .collect();
    ToolbarLink::from_commands(toolbar, actions.iter().map(|a| a.id.as_str()))
}

/// 关联工具栏的动作
///
/// 先激活关联记录的工作台，确保工具栏已加载，然后恢复原来的工作台。
pub fn resolve_toolbar<C>(catalog: &mut C, link: &ToolbarLink) -> Vec<CommandAction>
where
    C: CommandCatalog + ?Sized,
{
    let modules: Vec<String> = link.modules().collect();
    if !modules.is_empty() {
        let last_workbench = catalog.active_workbench();
        for module in &modules {
            catalog.activate_workbench(&workbench_class(module));
        }
        catalog.activate_workbench(&last_workbench);
    }

    let mut resolved: Vec<CommandAction> = Vec::new();
    for action in catalog.toolbar_actions(&link.toolbar) {
        if action.has_icon && !resolved.contains(&action) {
            resolved.push(action);
        }
    }
    resolved
}
