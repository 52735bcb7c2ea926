//! 饼菜单定义

use crate::rule::ContextRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认饼菜单的名称，它总是存在
pub const DEFAULT_PIE_NAME: &str = "Default";

/// 首次运行时默认饼菜单的命令
pub const DEFAULT_TOOLS: [&str; 8] = [
    "Std_ViewTop",
    "Std_New",
    "Std_ViewRight",
    "Std_BoxSelection",
    "Std_ViewBottom",
    "Std_ViewIsometric",
    "Std_ViewLeft",
    "Std_ViewScreenShot",
];

/// 默认布局半径
pub const DEFAULT_RADIUS: u32 = 100;

/// 默认按钮直径
pub const DEFAULT_BUTTON_SIZE: u32 = 32;

/// 注册表最多容纳的饼菜单数量
pub const MAX_PIES: usize = 999;

/// 饼菜单在注册表中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieId(pub u32);

impl PieId {
    /// 默认饼菜单首次创建时使用的索引
    pub const DEFAULT: PieId = PieId(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 命令在列表中的移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// 饼菜单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pie {
    /// 名称，注册表内唯一
    pub name: String,

    /// 有序的命令标识符；空字符串表示未分配的位置
    pub tools: Vec<String>,

    /// 布局半径
    pub radius: u32,

    /// 按钮直径
    pub button_size: u32,

    /// 上下文规则组，首次切换启用标志时才创建
    pub context: Option<ContextRules>,
}

impl Pie {
    /// 创建空饼菜单
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
            radius: DEFAULT_RADIUS,
            button_size: DEFAULT_BUTTON_SIZE,
            context: None,
        }
    }

    /// 默认饼菜单
    pub fn default_pie() -> Self {
        Self::new(DEFAULT_PIE_NAME).with_tools(DEFAULT_TOOLS)
    }

    /// 设置命令（链式调用）
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_PIE_NAME
    }

    /// 已分配的命令，跳过空位置
    pub fn assigned_tools(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// 启用的上下文规则组
    pub fn enabled_context(&self) -> Option<&ContextRules> {
        self.context.as_ref().filter(|rules| rules.enabled)
    }

    /// 追加命令，已存在时返回 false
    pub fn add_command(&mut self, command: impl Into<String>) -> bool {
        let command = command.into();
        if !command.is_empty() && self.tools.contains(&command) {
            return false;
        }
        self.tools.push(command);
        true
    }

    /// 删除指定位置的命令
    pub fn remove_command(&mut self, position: usize) -> Option<String> {
        if position < self.tools.len() {
            Some(self.tools.remove(position))
        } else {
            None
        }
    }

    /// 移动命令，返回新位置；已在边界或位置无效时返回 `None`
    pub fn move_command(&mut self, position: usize, direction: MoveDirection) -> Option<usize> {
        if position >= self.tools.len() {
            return None;
        }

        let target = match direction {
            MoveDirection::Up => position.checked_sub(1)?,
            MoveDirection::Down => position + 1,
        };

        if target >= self.tools.len() {
            return None;
        }

        self.tools.swap(position, target);
        Some(target)
    }
}
