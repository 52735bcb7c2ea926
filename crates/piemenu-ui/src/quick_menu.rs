//! 快捷菜单
//!
//! 饼菜单角落按钮弹出的菜单：触发方式、上下文开关、饼菜单列表、
//! 工具栏子菜单（"Show" 直接显示，"Save" 保存为饼菜单）。

use crate::catalog::{toolbar_commands, toolbar_link, CommandCatalog};
use crate::controller::{ContextController, SelectionSource};
use piemenu_config::{ParamStore, PieRegistry, RegistryError, TriggerMode};
use tracing::info;

/// 饼菜单列表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieEntry {
    pub name: String,
    /// 当前固定的饼菜单；关联工具栏时没有选中项
    pub checked: bool,
}

/// 工具栏子菜单中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarEntry {
    pub toolbar: String,
    /// 正在直接显示该工具栏
    pub shown: bool,
}

/// 快捷菜单模型，每次打开时重新构建
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickMenu {
    pub trigger_mode: TriggerMode,
    pub context_enabled: bool,
    pub pies: Vec<PieEntry>,
    pub toolbars: Vec<ToolbarEntry>,
}

/// 快捷菜单操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickMenuAction {
    SetTriggerMode(TriggerMode),
    SetContext(bool),
    SelectPie(String),
    ShowToolbar(String),
    SaveToolbar(String),
}

impl QuickMenuAction {
    /// 执行后是否需要在原位置重新弹出饼菜单
    pub fn needs_reshow(&self) -> bool {
        !matches!(self, QuickMenuAction::SetContext(_) | QuickMenuAction::SaveToolbar(_))
    }
}

impl QuickMenu {
    pub fn build<S, C>(registry: &PieRegistry<S>, catalog: &C) -> Self
    where
        S: ParamStore,
        C: CommandCatalog + ?Sized,
    {
        let settings = registry.settings();
        let linked = settings.toolbar.as_ref().map(|link| link.toolbar.as_str());

        let pies = registry
            .names()
            .map(|name| PieEntry {
                name: name.to_string(),
                checked: linked.is_none() && name == settings.current_pie,
            })
            .collect();

        let toolbars = catalog
            .toolbars()
            .into_iter()
            .map(|toolbar| ToolbarEntry {
                shown: linked == Some(toolbar.as_str()),
                toolbar,
            })
            .collect();

        Self {
            trigger_mode: settings.trigger_mode,
            context_enabled: settings.enable_context,
            pies,
            toolbars,
        }
    }

    pub fn checked_pie(&self) -> Option<&str> {
        self.pies.iter().find(|p| p.checked).map(|p| p.name.as_str())
    }
}

/// 执行快捷菜单操作
pub fn apply_action<S, C, Src>(
    action: &QuickMenuAction,
    registry: &mut PieRegistry<S>,
    catalog: &C,
    controller: &mut ContextController<Src>,
) -> Result<(), RegistryError>
where
    S: ParamStore,
    C: CommandCatalog + ?Sized,
    Src: SelectionSource,
{
    match action {
        QuickMenuAction::SetTriggerMode(mode) => registry.set_trigger_mode(*mode)?,
        QuickMenuAction::SetContext(enabled) => controller.set_context_enabled(registry, *enabled)?,
        QuickMenuAction::SelectPie(name) => registry.set_current_pie(name)?,
        QuickMenuAction::ShowToolbar(toolbar) => registry.link_toolbar(toolbar_link(catalog, toolbar))?,
        QuickMenuAction::SaveToolbar(toolbar) => {
            let commands = toolbar_commands(catalog, toolbar);
            registry.save_toolbar_as_pie(toolbar, commands)?;
            info!("Saved toolbar {:?} as a pie", toolbar);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::FakeCatalog;
    use crate::controller::tests::FakeSource;
    use piemenu_config::MemoryStore;
    use piemenu_core::pie::DEFAULT_PIE_NAME;

    fn setup() -> (PieRegistry<MemoryStore>, FakeCatalog, ContextController<FakeSource>) {
        let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
        registry.create_pie("Part").unwrap();
        let catalog = FakeCatalog::new("PartWorkbench")
            .with_toolbar("Part tools", &["Part_Box", "Part_Cylinder"])
            .with_toolbar("View", &["Std_ViewTop"]);
        (registry, catalog, ContextController::new(FakeSource::default()))
    }

    #[test]
    fn test_build_marks_current_pie() {
        let (registry, catalog, _) = setup();
        let menu = QuickMenu::build(&registry, &catalog);

        assert_eq!(menu.trigger_mode, TriggerMode::Press);
        assert!(!menu.context_enabled);
        assert_eq!(menu.checked_pie(), Some(DEFAULT_PIE_NAME));
        assert_eq!(menu.pies.len(), 2);
        assert_eq!(menu.toolbars.len(), 2);
        assert!(menu.toolbars.iter().all(|t| !t.shown));
    }

    #[test]
    fn test_show_toolbar_clears_pie_check() {
        let (mut registry, catalog, mut controller) = setup();
        let action = QuickMenuAction::ShowToolbar("Part tools".to_string());
        apply_action(&action, &mut registry, &catalog, &mut controller).unwrap();
        assert!(action.needs_reshow());

        let menu = QuickMenu::build(&registry, &catalog);
        assert_eq!(menu.checked_pie(), None);
        assert!(menu.toolbars.iter().any(|t| t.toolbar == "Part tools" && t.shown));
        assert_eq!(
            registry.settings().toolbar.as_ref().map(|l| l.to_string()).as_deref(),
            Some("Part: Part tools")
        );

        let action = QuickMenuAction::SelectPie("Part".to_string());
        apply_action(&action, &mut registry, &catalog, &mut controller).unwrap();
        let menu = QuickMenu::build(&registry, &catalog);
        assert_eq!(menu.checked_pie(), Some("Part"));
        assert!(registry.settings().toolbar.is_none());
    }

    #[test]
    fn test_save_toolbar() {
        let (mut registry, catalog, mut controller) = setup();
        let action = QuickMenuAction::SaveToolbar("Part tools".to_string());
        apply_action(&action, &mut registry, &catalog, &mut controller).unwrap();
        assert!(!action.needs_reshow());
        assert_eq!(
            registry.tool_list("Part tools").unwrap(),
            ["Part_Box", "Part_Cylinder"]
        );

        let err = apply_action(&action, &mut registry, &catalog, &mut controller).unwrap_err();
        assert!(err.is_name_rejection());
    }

    #[test]
    fn test_mode_and_context_toggles() {
        let (mut registry, catalog, mut controller) = setup();
        apply_action(
            &QuickMenuAction::SetTriggerMode(TriggerMode::Hover),
            &mut registry,
            &catalog,
            &mut controller,
        )
        .unwrap();
        apply_action(&QuickMenuAction::SetContext(true), &mut registry, &catalog, &mut controller).unwrap();

        let menu = QuickMenu::build(&registry, &catalog);
        assert_eq!(menu.trigger_mode, TriggerMode::Hover);
        assert!(menu.context_enabled);
        assert!(controller.is_subscribed());

        let err = apply_action(
            &QuickMenuAction::SelectPie("Missing".to_string()),
            &mut registry,
            &catalog,
            &mut controller,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }
}
