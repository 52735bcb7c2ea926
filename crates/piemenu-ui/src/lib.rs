//! 饼菜单界面胶水
//!
//! 宿主界面通过这里的接口驱动饼菜单：
//! - `SelectionSource` / `ContextController`：选择变化时切换上下文饼菜单
//! - `CommandCatalog`：把命令标识符解析为宿主动作
//! - `QuickMenu`：饼菜单角落里的快捷菜单
//!
//! 绘制和弹出动画由宿主负责。

pub mod catalog;
pub mod controller;
pub mod menu;
pub mod quick_menu;
pub mod state;

pub use catalog::{CommandAction, CommandCatalog};
pub use controller::{ContextController, ContextOutcome, SelectionEvent, SelectionSource};
pub use menu::{MenuContent, MenuSource};
pub use quick_menu::{QuickMenu, QuickMenuAction};
pub use state::MenuState;
