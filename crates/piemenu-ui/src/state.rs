//! 菜单状态
//!
//! 弹出过程中的可重入标志，由界面层持有并显式传给控制器。

/// 屏幕坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 饼菜单弹出状态
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    /// 本次弹出由选择变化触发
    pub selection_triggered: bool,

    /// 正在显示上下文饼菜单
    pub context_phase: bool,

    /// 上一次弹出的位置
    pub last_pos: Option<ScreenPos>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 选择命中上下文饼菜单
    pub fn enter_context(&mut self) {
        self.context_phase = true;
        self.selection_triggered = true;
    }

    pub fn exit_context(&mut self) {
        self.context_phase = false;
        self.selection_triggered = false;
    }

    /// 计算弹出中心
    ///
    /// 按键触发时总在光标处。其他情况（切换饼菜单、快捷菜单操作后重新弹出）
    /// 留在上一次的位置，只有选择触发的第一次上下文弹出跟随光标。
    pub fn popup_anchor(&mut self, cursor: ScreenPos, key_triggered: bool) -> ScreenPos {
        let pos = if key_triggered {
            cursor
        } else if self.context_phase && self.selection_triggered {
            self.selection_triggered = false;
            cursor
        } else {
            self.last_pos.unwrap_or(cursor)
        };

        self.last_pos = Some(pos);
        pos
    }
}
