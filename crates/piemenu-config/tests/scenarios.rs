//! 注册表端到端场景

use piemenu_config::layout::{self, index_path, pie_path};
use piemenu_config::{
    ConfigError, MemoryStore, ParamStore, PieRegistry, RegistryError, SqliteStore,
};
use piemenu_core::prelude::*;
use piemenu_core::pie::MAX_PIES;
use tempfile::TempDir;

fn edge_mode(registry: &mut PieRegistry<MemoryStore>) {
    registry.create_pie("EdgeMode").unwrap();
    registry
        .set_context_rule("EdgeMode", TopoKind::Vertex, TopoRule::new(CompareOp::Equal, 0))
        .unwrap();
    registry
        .set_context_rule("EdgeMode", TopoKind::Edge, TopoRule::new(CompareOp::Greater, 0))
        .unwrap();
    registry
        .set_context_rule("EdgeMode", TopoKind::Face, TopoRule::new(CompareOp::Equal, 0))
        .unwrap();
    registry
        .set_context_rule("EdgeMode", TopoKind::Object, TopoRule::new(CompareOp::LessEqual, 1))
        .unwrap();
    registry.set_context_enabled("EdgeMode", true).unwrap();
}

#[test]
fn test_edge_selection_switches_pie() {
    let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
    edge_mode(&mut registry);

    let selection = [SelectedItem::with_sub_elements("Doc", "Box", ["Edge1", "Edge3"])];
    let counts = SelectionCounts::from_selection(&selection);
    assert_eq!(counts, SelectionCounts::new(0, 2, 0, 0));
    assert_eq!(registry.resolve(&counts), Some("EdgeMode"));

    let selection = [SelectedItem::with_sub_elements("Doc", "Box", ["Face2"])];
    let counts = SelectionCounts::from_selection(&selection);
    assert_eq!(registry.resolve(&counts), None);
    assert_eq!(
        registry.current_pie().map(|p| p.name.as_str()),
        Some(DEFAULT_PIE_NAME)
    );
}

#[test]
fn test_duplicate_create_keeps_registry() {
    let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
    registry.create_pie("Part").unwrap();
    let before: Vec<String> = registry.names().map(str::to_string).collect();

    assert!(registry.create_pie("Part").unwrap_err().is_name_rejection());
    let after: Vec<String> = registry.names().map(str::to_string).collect();
    assert_eq!(before, after);
}

#[test]
fn test_capacity_limit() {
    let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
    for n in 1..MAX_PIES {
        registry.create_pie(&format!("Pie{}", n)).unwrap();
    }
    assert_eq!(registry.len(), MAX_PIES);

    let err = registry.create_pie("OneTooMany").unwrap_err();
    assert!(matches!(err, RegistryError::RegistryFull(MAX_PIES)));
    assert!(!err.is_name_rejection());
    assert_eq!(registry.len(), MAX_PIES);
}

#[test]
fn test_renamed_default_is_reseeded_after_removal() {
    let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
    registry.set_tool_list(DEFAULT_PIE_NAME, ["Part_Box"]).unwrap();

    registry.rename_pie(DEFAULT_PIE_NAME, "Default2").unwrap();
    assert!(!registry.contains(DEFAULT_PIE_NAME));
    assert_eq!(registry.settings().current_pie, "Default2");

    registry.remove_pie("Default2").unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.tool_list(DEFAULT_PIE_NAME).unwrap(), DEFAULT_TOOLS);
    assert_eq!(registry.settings().current_pie, DEFAULT_PIE_NAME);
}

#[test]
fn test_reopen_reproduces_state() {
    let (mut registry, _) = PieRegistry::open(MemoryStore::new()).unwrap();
    edge_mode(&mut registry);
    registry.create_pie("Sketch").unwrap();
    registry.set_tool_list("Sketch", ["Sketcher_NewSketch", "", "Sketcher_Pad"]).unwrap();
    registry.set_radius("Sketch", 120).unwrap();
    registry.set_current_pie("Sketch").unwrap();
    registry.set_enable_context(true).unwrap();

    let names: Vec<String> = registry.names().map(str::to_string).collect();
    let pies: Vec<Pie> = registry.pies().cloned().collect();

    let (reopened, report) = PieRegistry::open(registry.into_store()).unwrap();
    assert!(!report.seeded_default);
    assert!(report.repaired.is_empty());
    assert_eq!(reopened.names().collect::<Vec<_>>(), names);
    assert_eq!(reopened.pies().cloned().collect::<Vec<_>>(), pies);
    assert_eq!(reopened.settings().current_pie, "Sketch");
    assert!(reopened.settings().enable_context);
}

#[test]
fn test_json_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("params.json");

    let (mut registry, _) = PieRegistry::open(MemoryStore::load(&path).unwrap()).unwrap();
    edge_mode(&mut registry);
    registry.store().save().unwrap();

    let (reopened, _) = PieRegistry::open(MemoryStore::load(&path).unwrap()).unwrap();
    let counts = SelectionCounts::new(0, 1, 0, 1);
    assert_eq!(reopened.resolve(&counts), Some("EdgeMode"));
}

#[test]
fn test_corrupt_configuration_is_repaired() {
    let mut store = MemoryStore::new();
    store
        .set_string(&index_path(), layout::KEY_INDEX_LIST, "0.,.1.,.2.,.abc")
        .unwrap();
    store.set_string(&index_path(), "0", "Default").unwrap();
    store.set_string(&index_path(), "1", "Part").unwrap();
    store.set_string(&index_path(), "2", "Part").unwrap();
    store.set_string(&pie_path(PieId(1)), layout::KEY_TOOL_LIST, "Part_Box").unwrap();

    let (registry, report) = PieRegistry::open(store).unwrap();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Default", "Part"]);
    assert!(report
        .repaired
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidIndex(token) if token == "abc")));
    assert!(report
        .repaired
        .iter()
        .any(|e| matches!(e, ConfigError::DuplicateEntry { index: 2, .. })));

    let stored = registry
        .store()
        .get_string(&index_path(), layout::KEY_INDEX_LIST)
        .unwrap();
    assert_eq!(stored.as_deref(), Some("0.,.1"));
}

#[test]
fn test_sqlite_backend() {
    let store = SqliteStore::open_in_memory().unwrap();
    let (mut registry, report) = PieRegistry::open(store).unwrap();
    assert!(report.seeded_default);

    registry.create_pie("Faces").unwrap();
    registry
        .set_context_rule("Faces", TopoKind::Face, TopoRule::new(CompareOp::GreaterEqual, 1))
        .unwrap();
    registry
        .set_context_rule("Faces", TopoKind::Edge, TopoRule::new(CompareOp::GreaterEqual, 0))
        .unwrap();
    registry
        .set_context_rule("Faces", TopoKind::Vertex, TopoRule::new(CompareOp::GreaterEqual, 0))
        .unwrap();
    registry
        .set_context_rule("Faces", TopoKind::Object, TopoRule::new(CompareOp::GreaterEqual, 1))
        .unwrap();
    registry.set_context_enabled("Faces", true).unwrap();
    registry.copy_pie("Faces", "Faces2").unwrap();

    let (reopened, _) = PieRegistry::open(registry.into_store()).unwrap();
    assert_eq!(
        reopened.names().collect::<Vec<_>>(),
        vec!["Default", "Faces", "Faces2"]
    );
    let counts = SelectionCounts::new(0, 0, 2, 1);
    assert_eq!(reopened.resolve(&counts), Some("Faces"));
}
