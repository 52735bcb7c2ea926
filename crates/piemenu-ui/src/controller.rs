//! 上下文控制器
//!
//! 订阅宿主的选择事件，维护当前选择，并在每次变化后重新解析上下文饼菜单。
//! 只在上下文模式启用时订阅。

use crate::state::MenuState;
use piemenu_config::{ParamStore, PieRegistry, StoreError};
use piemenu_core::pie::DEFAULT_PIE_NAME;
use piemenu_core::selection::{SelectedItem, SelectionCounts};
use tracing::debug;

/// 宿主选择事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// 选中；`sub` 为空表示选中整个对象
    Added {
        document: String,
        object: String,
        sub: String,
    },
    /// 取消选中；`sub` 为空表示整个对象
    Removed {
        document: String,
        object: String,
        sub: String,
    },
    /// 清空选择
    Cleared,
}

impl SelectionEvent {
    pub fn added(document: &str, object: &str, sub: &str) -> Self {
        SelectionEvent::Added {
            document: document.to_string(),
            object: object.to_string(),
            sub: sub.to_string(),
        }
    }

    pub fn removed(document: &str, object: &str, sub: &str) -> Self {
        SelectionEvent::Removed {
            document: document.to_string(),
            object: object.to_string(),
            sub: sub.to_string(),
        }
    }
}

/// 宿主选择事件源
pub trait SelectionSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// 一次选择变化的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOutcome {
    /// 命中上下文饼菜单，界面应在光标处重新弹出
    Show { pie: String },
    /// 没有命中，回到用户固定的饼菜单
    Fallback { pie: String },
    /// 选择为空或上下文模式关闭，退出上下文阶段
    Exit,
}

/// 上下文控制器
#[derive(Debug)]
pub struct ContextController<S: SelectionSource> {
    source: S,
    subscribed: bool,
    selection: Vec<SelectedItem>,
}

impl<S: SelectionSource> ContextController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            subscribed: false,
            selection: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn selection(&self) -> &[SelectedItem] {
        &self.selection
    }

    pub fn counts(&self) -> SelectionCounts {
        SelectionCounts::from_selection(&self.selection)
    }

    /// 按设置订阅或退订选择事件
    pub fn sync_subscription(&mut self, enabled: bool) {
        match (enabled, self.subscribed) {
            (true, false) => {
                self.source.subscribe();
                self.subscribed = true;
                debug!("Subscribed to selection events");
            }
            (false, true) => {
                self.source.unsubscribe();
                self.subscribed = false;
                debug!("Unsubscribed from selection events");
            }
            _ => {}
        }
    }

    /// 切换上下文模式并保存
    pub fn set_context_enabled<P: ParamStore>(
        &mut self,
        registry: &mut PieRegistry<P>,
        enabled: bool,
    ) -> Result<(), StoreError> {
        registry.set_enable_context(enabled)?;
        self.sync_subscription(enabled);
        Ok(())
    }

    /// 处理一次选择事件
    pub fn on_selection_event<P: ParamStore>(
        &mut self,
        event: SelectionEvent,
        registry: &mut PieRegistry<P>,
        state: &mut MenuState,
    ) -> Result<ContextOutcome, StoreError> {
        self.apply(event);
        self.on_selection_changed(registry, state)
    }

    /// 用当前选择重新解析上下文饼菜单
    pub fn on_selection_changed<P: ParamStore>(
        &mut self,
        registry: &mut PieRegistry<P>,
        state: &mut MenuState,
    ) -> Result<ContextOutcome, StoreError> {
        if !registry.settings().enable_context || self.selection.is_empty() {
            state.exit_context();
            return Ok(ContextOutcome::Exit);
        }

        let counts = self.counts();
        let resolved = registry.resolve(&counts).map(str::to_string);
        match resolved {
            Some(pie) => {
                debug!("Selection {:?} resolved to pie {:?}", counts, pie);
                registry.set_context_pie(Some(&pie))?;
                state.enter_context();
                Ok(ContextOutcome::Show { pie })
            }
            None => {
                state.exit_context();
                let pie = registry
                    .current_pie()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| DEFAULT_PIE_NAME.to_string());
                Ok(ContextOutcome::Fallback { pie })
            }
        }
    }

    fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Added { document, object, sub } => {
                let pos = self.find(&document, &object);
                match (pos, sub.is_empty()) {
                    (None, true) => self.selection.push(SelectedItem::object(document, object)),
                    (None, false) => self
                        .selection
                        .push(SelectedItem::with_sub_elements(document, object, [sub])),
                    (Some(_), true) => {}
                    (Some(idx), false) => {
                        let subs = &mut self.selection[idx].sub_elements;
                        if !subs.contains(&sub) {
                            subs.push(sub);
                        }
                    }
                }
            }
            SelectionEvent::Removed { document, object, sub } => {
                let Some(idx) = self.find(&document, &object) else {
                    return;
                };
                if sub.is_empty() {
                    self.selection.remove(idx);
                    return;
                }

                let subs = &mut self.selection[idx].sub_elements;
                subs.retain(|s| *s != sub);
                if subs.is_empty() {
                    self.selection.remove(idx);
                }
            }
            SelectionEvent::Cleared => self.selection.clear(),
        }
    }

    fn find(&self, document: &str, object: &str) -> Option<usize> {
        self.selection
            .iter()
            .position(|item| item.document == document && item.object == object)
    }
}
