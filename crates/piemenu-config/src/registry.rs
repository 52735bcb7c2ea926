//! 饼菜单注册表
//!
//! 按插入顺序保存所有饼菜单，每次修改立即写回参数存储，没有事务批处理。
//! 名为 "Default" 的饼菜单总是存在：打开注册表和删除饼菜单之后，
//! 如果它不存在就用内置命令重新创建。

use crate::error::{ConfigError, RegistryError, StoreError};
use crate::layout;
use crate::param::ParamStore;
use crate::settings::{self, Settings, TriggerMode};
use piemenu_core::command::ToolbarLink;
use piemenu_core::pie::{
    MoveDirection, Pie, PieId, DEFAULT_BUTTON_SIZE, DEFAULT_PIE_NAME, DEFAULT_RADIUS, DEFAULT_TOOLS, MAX_PIES,
};
use piemenu_core::resolver::resolve_context_pie;
use piemenu_core::rule::{ContextRules, TopoKind, TopoRule};
use piemenu_core::selection::SelectionCounts;
use tracing::{debug, info, warn};

/// 打开注册表时的检查结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 已就地修复的配置损坏
    pub repaired: Vec<ConfigError>,

    /// 是否（重新）创建了默认饼菜单
    pub seeded_default: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    id: PieId,
    pie: Pie,
}

/// 饼菜单注册表
#[derive(Debug)]
pub struct PieRegistry<S: ParamStore> {
    store: S,
    entries: Vec<Entry>,
    settings: Settings,
}

impl<S: ParamStore> PieRegistry<S> {
    /// 从存储加载注册表，修复发现的损坏
    pub fn open(mut store: S) -> Result<(Self, LoadReport), StoreError> {
        settings::remove_obsolete(&mut store)?;

        let mut report = LoadReport::default();
        let listed = layout::read_index_list(&store, &mut report.repaired)?;
        let mut index_dirty = !report.repaired.is_empty();

        let mut entries: Vec<Entry> = Vec::with_capacity(listed.len());
        for id in listed {
            let Some(name) = layout::read_pie_name(&store, id)? else {
                let issue = ConfigError::MissingGroup(id.raw());
                warn!("{}", issue);
                report.repaired.push(issue);
                store.remove_group(&layout::pie_path(id))?;
                index_dirty = true;
                continue;
            };

            if entries.iter().any(|e| e.pie.name == name) {
                let issue = ConfigError::DuplicateEntry { name, index: id.raw() };
                warn!("{}", issue);
                report.repaired.push(issue);
                layout::remove_pie(&mut store, id)?;
                index_dirty = true;
                continue;
            }

            let pie = layout::read_pie(&mut store, id, name, &mut report.repaired)?;
            entries.push(Entry { id, pie });
        }

        let settings = Settings::load(&store)?;
        let mut registry = Self {
            store,
            entries,
            settings,
        };

        if index_dirty {
            registry.write_index_list()?;
        }

        report.seeded_default = registry.ensure_default()?;

        if !registry.contains(&registry.settings.current_pie) {
            debug!("Current pie {:?} is missing, using Default", registry.settings.current_pie);
            registry.write_current_pie(DEFAULT_PIE_NAME)?;
        }
        if let Some(context) = registry.settings.context_pie.clone() {
            if !registry.contains(&context) {
                registry.clear_context_pie()?;
            }
        }

        info!(
            "Loaded {} pies ({} repaired entries)",
            registry.entries.len(),
            report.repaired.len()
        );

        Ok((registry, report))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 饼菜单数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// 按注册表顺序的所有名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pie.name.as_str())
    }

    /// 按注册表顺序的所有饼菜单
    pub fn pies(&self) -> impl Iterator<Item = &Pie> {
        self.entries.iter().map(|e| &e.pie)
    }

    pub fn get(&self, name: &str) -> Option<&Pie> {
        self.position(name).map(|idx| &self.entries[idx].pie)
    }

    pub fn id_of(&self, name: &str) -> Option<PieId> {
        self.position(name).map(|idx| self.entries[idx].id)
    }

    /// 新建饼菜单
    pub fn create_pie(&mut self, name: &str) -> Result<PieId, RegistryError> {
        self.check_new_name(name)?;
        self.insert(Pie::new(name))
    }

    /// 删除饼菜单；不存在时什么也不做
    pub fn remove_pie(&mut self, name: &str) -> Result<(), RegistryError> {
        let Some(idx) = self.position(name) else {
            debug!("Remove ignored, no pie named {:?}", name);
            return Ok(());
        };

        let entry = self.entries.remove(idx);
        self.write_index_list()?;
        layout::remove_pie(&mut self.store, entry.id)?;
        info!("Removed pie {:?} (index {})", name, entry.id);

        self.ensure_default()?;

        if self.settings.current_pie == name {
            self.write_current_pie(DEFAULT_PIE_NAME)?;
        }
        if self.settings.context_pie.as_deref() == Some(name) {
            self.clear_context_pie()?;
        }

        Ok(())
    }

    /// 重命名饼菜单
    pub fn rename_pie(&mut self, old_name: &str, new_name: &str) -> Result<(), RegistryError> {
        let idx = self.require(old_name)?;
        if old_name == new_name {
            return Ok(());
        }
        self.check_new_name(new_name)?;

        let id = self.entries[idx].id;
        self.entries[idx].pie.name = new_name.to_string();
        layout::write_pie_name(&mut self.store, id, new_name)?;

        if self.settings.current_pie == old_name {
            self.write_current_pie(new_name)?;
        }
        if self.settings.context_pie.as_deref() == Some(old_name) {
            self.set_context_pie(Some(new_name))?;
        }

        info!("Renamed pie {:?} to {:?}", old_name, new_name);
        Ok(())
    }

    /// 复制饼菜单，包括命令、尺寸和完整的上下文规则组
    pub fn copy_pie(&mut self, source: &str, new_name: &str) -> Result<PieId, RegistryError> {
        self.check_new_name(new_name)?;
        let idx = self.require(source)?;

        let mut pie = self.entries[idx].pie.clone();
        pie.name = new_name.to_string();
        self.insert(pie)
    }

    /// 命令列表
    pub fn tool_list(&self, name: &str) -> Result<&[String], RegistryError> {
        let idx = self.require(name)?;
        Ok(&self.entries[idx].pie.tools)
    }

    /// 替换命令列表；允许空字符串表示未分配的位置
    pub fn set_tool_list<I, T>(&mut self, name: &str, tools: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let idx = self.require(name)?;
        self.entries[idx].pie.tools = tools.into_iter().map(Into::into).collect();
        self.write_tools(idx)
    }

    /// 追加命令，已存在时返回 false
    pub fn add_command(&mut self, name: &str, command: &str) -> Result<bool, RegistryError> {
        let idx = self.require(name)?;
        if !self.entries[idx].pie.add_command(command) {
            return Ok(false);
        }
        self.write_tools(idx)?;
        Ok(true)
    }

    pub fn remove_command(&mut self, name: &str, position: usize) -> Result<Option<String>, RegistryError> {
        let idx = self.require(name)?;
        let removed = self.entries[idx].pie.remove_command(position);
        if removed.is_some() {
            self.write_tools(idx)?;
        }
        Ok(removed)
    }

    pub fn move_command(
        &mut self,
        name: &str,
        position: usize,
        direction: MoveDirection,
    ) -> Result<Option<usize>, RegistryError> {
        let idx = self.require(name)?;
        let moved = self.entries[idx].pie.move_command(position, direction);
        if moved.is_some() {
            self.write_tools(idx)?;
        }
        Ok(moved)
    }

    /// 设置布局半径；0 按默认值保存，与加载时的处理一致
    pub fn set_radius(&mut self, name: &str, radius: u32) -> Result<(), RegistryError> {
        let idx = self.require(name)?;
        let radius = if radius == 0 { DEFAULT_RADIUS } else { radius };
        self.entries[idx].pie.radius = radius;
        let id = self.entries[idx].id;
        self.store
            .set_int(&layout::pie_path(id), layout::KEY_RADIUS, i64::from(radius))?;
        Ok(())
    }

    /// 设置按钮直径；0 按默认值保存
    pub fn set_button_size(&mut self, name: &str, size: u32) -> Result<(), RegistryError> {
        let idx = self.require(name)?;
        let size = if size == 0 { DEFAULT_BUTTON_SIZE } else { size };
        self.entries[idx].pie.button_size = size;
        let id = self.entries[idx].id;
        self.store
            .set_int(&layout::pie_path(id), layout::KEY_BUTTON, i64::from(size))?;
        Ok(())
    }

    /// 切换上下文规则组的启用标志；首次切换时创建默认规则组
    pub fn set_context_enabled(&mut self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let idx = self.require(name)?;
        self.entries[idx]
            .pie
            .context
            .get_or_insert_with(ContextRules::new)
            .enabled = enabled;
        self.write_context(idx)
    }

    /// 设置一条规则；规则组不存在时以未启用状态创建
    pub fn set_context_rule(&mut self, name: &str, kind: TopoKind, rule: TopoRule) -> Result<(), RegistryError> {
        let idx = self.require(name)?;
        self.entries[idx]
            .pie
            .context
            .get_or_insert_with(ContextRules::new)
            .set(kind, rule);
        self.write_context(idx)
    }

    /// 恢复默认规则组（未启用）
    pub fn reset_context(&mut self, name: &str) -> Result<(), RegistryError> {
        let idx = self.require(name)?;
        let id = self.entries[idx].id;
        layout::remove_context_rules(&mut self.store, id)?;
        self.entries[idx].pie.context = Some(ContextRules::new());
        self.write_context(idx)
    }

    /// 按注册表顺序的启用规则组
    pub fn context_candidates(&self) -> impl Iterator<Item = (&str, &ContextRules)> {
        self.entries
            .iter()
            .filter_map(|e| e.pie.enabled_context().map(|rules| (e.pie.name.as_str(), rules)))
    }

    /// 解析当前选择对应的上下文饼菜单
    pub fn resolve(&self, counts: &SelectionCounts) -> Option<&str> {
        resolve_context_pie(counts, self.context_candidates())
    }

    /// 恢复默认饼菜单的内置命令，并把它设为当前饼菜单
    pub fn restore_default_pie(&mut self) -> Result<(), RegistryError> {
        if !self.ensure_default()? {
            let idx = self.require(DEFAULT_PIE_NAME)?;
            self.entries[idx].pie.tools = DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect();
            self.write_tools(idx)?;
        }

        self.set_current_pie(DEFAULT_PIE_NAME)?;
        self.set_radius(DEFAULT_PIE_NAME, DEFAULT_RADIUS)?;
        self.set_button_size(DEFAULT_PIE_NAME, DEFAULT_BUTTON_SIZE)?;
        info!("Restored default pie");
        Ok(())
    }

    /// 用户固定的当前饼菜单，不存在时回退到默认饼菜单
    pub fn current_pie(&self) -> Option<&Pie> {
        self.get(&self.settings.current_pie)
            .or_else(|| self.get(DEFAULT_PIE_NAME))
    }

    /// 最近一次解析出的上下文饼菜单
    pub fn context_pie(&self) -> Option<&Pie> {
        self.settings.context_pie.as_deref().and_then(|name| self.get(name))
    }

    /// 固定当前饼菜单，同时取消工具栏关联
    pub fn set_current_pie(&mut self, name: &str) -> Result<(), RegistryError> {
        self.require(name)?;
        self.unlink_toolbar()?;
        self.write_current_pie(name)?;
        Ok(())
    }

    pub fn set_context_pie(&mut self, name: Option<&str>) -> Result<(), StoreError> {
        settings::write_context_pie(&mut self.store, name)?;
        self.settings.context_pie = name.map(str::to_string);
        Ok(())
    }

    pub fn clear_context_pie(&mut self) -> Result<(), StoreError> {
        self.set_context_pie(None)
    }

    pub fn set_enable_context(&mut self, enabled: bool) -> Result<(), StoreError> {
        settings::write_enable_context(&mut self.store, enabled)?;
        self.settings.enable_context = enabled;
        Ok(())
    }

    pub fn set_trigger_mode(&mut self, mode: TriggerMode) -> Result<(), StoreError> {
        settings::write_trigger_mode(&mut self.store, mode)?;
        self.settings.trigger_mode = mode;
        Ok(())
    }

    /// 设置触发快捷键；空字符串被忽略
    pub fn set_trigger_shortcut(&mut self, shortcut: &str) -> Result<(), StoreError> {
        if shortcut.is_empty() {
            return Ok(());
        }
        settings::write_trigger_shortcut(&mut self.store, shortcut)?;
        self.settings.trigger_shortcut = shortcut.to_string();
        Ok(())
    }

    /// 直接显示宿主工具栏
    pub fn link_toolbar(&mut self, link: ToolbarLink) -> Result<(), StoreError> {
        settings::write_toolbar_link(&mut self.store, Some(&link))?;
        info!("Linked toolbar {:?}", link.toolbar);
        self.settings.toolbar = Some(link);
        Ok(())
    }

    pub fn unlink_toolbar(&mut self) -> Result<(), StoreError> {
        if self.settings.toolbar.is_some() {
            settings::write_toolbar_link(&mut self.store, None)?;
            self.settings.toolbar = None;
        }
        Ok(())
    }

    /// 把宿主工具栏保存为同名的新饼菜单
    pub fn save_toolbar_as_pie<I, T>(&mut self, toolbar: &str, commands: I) -> Result<PieId, RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.check_new_name(toolbar)?;
        self.insert(Pie::new(toolbar).with_tools(commands))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.pie.name == name)
    }

    fn require(&self, name: &str) -> Result<usize, RegistryError> {
        self.position(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    fn check_new_name(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// 第一个未使用的索引，从1开始
    fn allocate_id(&self) -> Result<PieId, RegistryError> {
        if self.entries.len() >= MAX_PIES {
            return Err(RegistryError::RegistryFull(MAX_PIES));
        }

        (1..=MAX_PIES as u32)
            .map(PieId)
            .find(|id| self.entries.iter().all(|e| e.id != *id))
            .ok_or(RegistryError::RegistryFull(MAX_PIES))
    }

    fn insert(&mut self, pie: Pie) -> Result<PieId, RegistryError> {
        let id = self.allocate_id()?;
        self.insert_at(id, pie)?;
        Ok(id)
    }

    fn insert_at(&mut self, id: PieId, pie: Pie) -> Result<(), StoreError> {
        layout::remove_pie(&mut self.store, id)?;
        layout::write_pie(&mut self.store, id, &pie)?;
        info!("Created pie {:?} (index {})", pie.name, id);
        self.entries.push(Entry { id, pie });
        self.write_index_list()
    }

    /// 默认饼菜单不存在时重新创建，返回是否创建了
    fn ensure_default(&mut self) -> Result<bool, StoreError> {
        if self.contains(DEFAULT_PIE_NAME) {
            return Ok(false);
        }

        let id = if self.entries.iter().any(|e| e.id == PieId::DEFAULT) {
            match self.allocate_id() {
                Ok(id) => id,
                Err(_) => {
                    warn!("Registry is full, cannot recreate the default pie");
                    return Ok(false);
                }
            }
        } else {
            PieId::DEFAULT
        };

        self.insert_at(id, Pie::default_pie())?;
        Ok(true)
    }

    fn write_index_list(&mut self) -> Result<(), StoreError> {
        let ids: Vec<PieId> = self.entries.iter().map(|e| e.id).collect();
        layout::write_index_list(&mut self.store, &ids)
    }

    fn write_current_pie(&mut self, name: &str) -> Result<(), StoreError> {
        settings::write_current_pie(&mut self.store, name)?;
        self.settings.current_pie = name.to_string();
        Ok(())
    }

    fn write_tools(&mut self, idx: usize) -> Result<(), RegistryError> {
        let entry = &self.entries[idx];
        layout::write_tools(&mut self.store, entry.id, &entry.pie.tools)?;
        Ok(())
    }

    fn write_context(&mut self, idx: usize) -> Result<(), RegistryError> {
        let entry = &self.entries[idx];
        if let Some(rules) = &entry.pie.context {
            layout::write_context_rules(&mut self.store, entry.id, rules)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use piemenu_core::rule::CompareOp;

    fn open_empty() -> PieRegistry<MemoryStore> {
        PieRegistry::open(MemoryStore::new()).unwrap().0
    }

    #[test]
    fn test_first_run_seeds_default() {
        let (registry, report) = PieRegistry::open(MemoryStore::new()).unwrap();
        assert!(report.seeded_default);
        assert!(report.repaired.is_empty());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.id_of(DEFAULT_PIE_NAME), Some(PieId::DEFAULT));
        assert_eq!(registry.tool_list(DEFAULT_PIE_NAME).unwrap(), DEFAULT_TOOLS);
        assert_eq!(registry.settings().current_pie, DEFAULT_PIE_NAME);
        assert_eq!(registry.current_pie().map(|p| p.name.as_str()), Some(DEFAULT_PIE_NAME));
    }

    #[test]
    fn test_create_allocates_first_free_index() {
        let mut registry = open_empty();
        assert_eq!(registry.create_pie("Part").unwrap(), PieId(1));
        assert_eq!(registry.create_pie("Sketch").unwrap(), PieId(2));
        registry.remove_pie("Part").unwrap();
        assert_eq!(registry.create_pie("Draft").unwrap(), PieId(1));

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Default", "Sketch", "Draft"]);
    }

    #[test]
    fn test_create_rejects_bad_names() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();

        let err = registry.create_pie("Part").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(_)));
        assert!(err.is_name_rejection());

        let err = registry.create_pie("").unwrap_err();
        assert!(matches!(err, RegistryError::EmptyName));
        assert!(err.is_name_rejection());

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut registry = open_empty();
        registry.remove_pie("Nothing").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_current_and_context_pie() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();
        registry.set_current_pie("Part").unwrap();
        registry.set_context_pie(Some("Part")).unwrap();

        registry.remove_pie("Part").unwrap();
        assert_eq!(registry.settings().current_pie, DEFAULT_PIE_NAME);
        assert_eq!(registry.settings().context_pie, None);
        assert!(registry.context_pie().is_none());
    }

    #[test]
    fn test_remove_default_recreates_it() {
        let mut registry = open_empty();
        registry.set_tool_list(DEFAULT_PIE_NAME, ["Part_Box"]).unwrap();

        registry.remove_pie(DEFAULT_PIE_NAME).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.tool_list(DEFAULT_PIE_NAME).unwrap(), DEFAULT_TOOLS);
    }

    #[test]
    fn test_rename() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();
        registry.create_pie("Sketch").unwrap();
        registry.set_current_pie("Part").unwrap();

        assert!(matches!(
            registry.rename_pie("Part", "Sketch"),
            Err(RegistryError::DuplicateName(_))
        ));
        assert!(matches!(
            registry.rename_pie("Missing", "Other"),
            Err(RegistryError::NotFound(_))
        ));
        registry.rename_pie("Part", "Part").unwrap();

        registry.rename_pie("Part", "Solids").unwrap();
        assert!(registry.contains("Solids"));
        assert!(!registry.contains("Part"));
        assert_eq!(registry.settings().current_pie, "Solids");
        assert_eq!(registry.id_of("Solids"), Some(PieId(1)));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut registry = open_empty();
        registry.create_pie("Edges").unwrap();
        registry.set_tool_list("Edges", ["Part_Fillet", "", "Part_Chamfer"]).unwrap();
        registry.set_radius("Edges", 80).unwrap();
        registry.set_button_size("Edges", 40).unwrap();
        registry
            .set_context_rule("Edges", TopoKind::Edge, TopoRule::new(CompareOp::Greater, 0))
            .unwrap();
        registry.set_context_enabled("Edges", true).unwrap();

        registry.copy_pie("Edges", "Edges2").unwrap();
        let source_pie = registry.get("Edges").unwrap().clone();

        registry.remove_pie("Edges").unwrap();
        let copy = registry.get("Edges2").unwrap();
        assert_eq!(copy.tools, source_pie.tools);
        assert_eq!(copy.radius, 80);
        assert_eq!(copy.button_size, 40);
        assert_eq!(copy.context, source_pie.context);
        assert!(copy.enabled_context().is_some());

        assert!(matches!(
            registry.copy_pie("Edges", "Edges3"),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.copy_pie("Edges2", "Default"),
            Err(RegistryError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_context_rules_are_lazy() {
        let mut registry = open_empty();
        registry.create_pie("Faces").unwrap();
        assert!(registry.get("Faces").unwrap().context.is_none());

        registry.set_context_enabled("Faces", true).unwrap();
        let rules = registry.get("Faces").unwrap().context.unwrap();
        assert!(rules.enabled);
        assert_eq!(rules.get(TopoKind::Face), TopoRule::default());

        registry
            .set_context_rule("Faces", TopoKind::Face, TopoRule::new(CompareOp::GreaterEqual, 1))
            .unwrap();
        registry.reset_context("Faces").unwrap();
        let rules = registry.get("Faces").unwrap().context.unwrap();
        assert!(!rules.enabled);
        assert_eq!(rules.get(TopoKind::Face), TopoRule::default());
    }

    #[test]
    fn test_resolve_uses_registry_order() {
        let mut registry = open_empty();
        for name in ["Loose", "Strict"] {
            registry.create_pie(name).unwrap();
            for kind in TopoKind::ALL {
                registry
                    .set_context_rule(name, kind, TopoRule::new(CompareOp::GreaterEqual, 0))
                    .unwrap();
            }
            registry.set_context_enabled(name, true).unwrap();
        }

        let counts = SelectionCounts::new(0, 0, 1, 0);
        assert_eq!(registry.resolve(&counts), Some("Loose"));

        registry.set_context_enabled("Loose", false).unwrap();
        assert_eq!(registry.resolve(&counts), Some("Strict"));
    }

    #[test]
    fn test_tool_list_editing() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();

        assert!(registry.add_command("Part", "Part_Box").unwrap());
        assert!(registry.add_command("Part", "Part_Cut").unwrap());
        assert!(!registry.add_command("Part", "Part_Box").unwrap());
        assert_eq!(registry.move_command("Part", 1, MoveDirection::Up).unwrap(), Some(0));
        assert_eq!(registry.tool_list("Part").unwrap(), ["Part_Cut", "Part_Box"]);
        assert_eq!(
            registry.remove_command("Part", 0).unwrap().as_deref(),
            Some("Part_Cut")
        );
        assert!(matches!(
            registry.tool_list("Missing"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_toolbar_linkage() {
        let mut registry = open_empty();
        registry
            .link_toolbar(ToolbarLink::parse("Part: Part tools"))
            .unwrap();
        assert!(registry.settings().toolbar.is_some());

        registry.set_current_pie(DEFAULT_PIE_NAME).unwrap();
        assert!(registry.settings().toolbar.is_none());

        let id = registry
            .save_toolbar_as_pie("Part tools", ["Part_Box", "Part_Cylinder"])
            .unwrap();
        assert_eq!(id, PieId(1));
        assert_eq!(registry.tool_list("Part tools").unwrap(), ["Part_Box", "Part_Cylinder"]);
    }

    #[test]
    fn test_restore_default_pie() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();
        registry.set_current_pie("Part").unwrap();
        registry.set_tool_list(DEFAULT_PIE_NAME, Vec::<String>::new()).unwrap();
        registry.set_radius(DEFAULT_PIE_NAME, 50).unwrap();

        registry.restore_default_pie().unwrap();
        let default = registry.get(DEFAULT_PIE_NAME).unwrap();
        assert_eq!(default.tools, DEFAULT_TOOLS);
        assert_eq!(default.radius, 100);
        assert_eq!(registry.settings().current_pie, DEFAULT_PIE_NAME);
    }

    #[test]
    fn test_zero_sizes_use_defaults() {
        let mut registry = open_empty();
        registry.create_pie("Part").unwrap();
        registry.set_radius("Part", 0).unwrap();
        registry.set_button_size("Part", 0).unwrap();

        let pie = registry.get("Part").unwrap().clone();
        assert_eq!(pie.radius, DEFAULT_RADIUS);
        assert_eq!(pie.button_size, DEFAULT_BUTTON_SIZE);

        let (reopened, report) = PieRegistry::open(registry.into_store()).unwrap();
        assert!(report.repaired.is_empty());
        assert_eq!(reopened.get("Part"), Some(&pie));
    }

    #[test]
    fn test_settings_are_persisted() {
        let mut registry = open_empty();
        registry.set_enable_context(true).unwrap();
        registry.set_trigger_mode(TriggerMode::Hover).unwrap();
        registry.set_trigger_shortcut("").unwrap();
        registry.set_trigger_shortcut("Q").unwrap();

        let reloaded = Settings::load(registry.store()).unwrap();
        assert!(reloaded.enable_context);
        assert_eq!(reloaded.trigger_mode, TriggerMode::Hover);
        assert_eq!(reloaded.trigger_shortcut, "Q");
    }
}
