//! 选择计数
//!
//! 把宿主的当前选择转换成四个计数：顶点、边、面、整个对象。

use crate::rule::TopoKind;
use serde::{Deserialize, Serialize};

/// 宿主选择中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    /// 文档名
    pub document: String,

    /// 对象名
    pub object: String,

    /// 子元素名，如 "Edge3"、"Face1"；为空表示选中了整个对象
    pub sub_elements: Vec<String>,
}

impl SelectedItem {
    /// 整个对象的选择
    pub fn object(document: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            object: object.into(),
            sub_elements: Vec::new(),
        }
    }

    /// 带子元素的选择
    pub fn with_sub_elements<I, S>(document: impl Into<String>, object: impl Into<String>, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            document: document.into(),
            object: object.into(),
            sub_elements: subs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_whole_object(&self) -> bool {
        self.sub_elements.is_empty()
    }
}

/// 按名称前缀对子元素分类（区分大小写），无法识别的返回 `None`
pub fn classify_sub_element(name: &str) -> Option<TopoKind> {
    if name.starts_with("Vertex") {
        Some(TopoKind::Vertex)
    } else if name.starts_with("Edge") {
        Some(TopoKind::Edge)
    } else if name.starts_with("Face") {
        Some(TopoKind::Face)
    } else {
        None
    }
}

/// 选择快照：四个计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionCounts {
    pub vertices: u32,
    pub edges: u32,
    pub faces: u32,
    pub objects: u32,
}

impl SelectionCounts {
    pub fn new(vertices: u32, edges: u32, faces: u32, objects: u32) -> Self {
        Self {
            vertices,
            edges,
            faces,
            objects,
        }
    }

    /// 统计一次选择
    pub fn from_selection<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a SelectedItem>,
    {
        let mut counts = Self::default();

        for item in items {
            if item.is_whole_object() {
                counts.objects += 1;
                continue;
            }

            for sub in &item.sub_elements {
                if let Some(kind) = classify_sub_element(sub) {
                    *counts.get_mut(kind) += 1;
                }
            }
        }

        counts
    }

    pub fn get(&self, kind: TopoKind) -> u32 {
        match kind {
            TopoKind::Vertex => self.vertices,
            TopoKind::Edge => self.edges,
            TopoKind::Face => self.faces,
            TopoKind::Object => self.objects,
        }
    }

    fn get_mut(&mut self, kind: TopoKind) -> &mut u32 {
        match kind {
            TopoKind::Vertex => &mut self.vertices,
            TopoKind::Edge => &mut self.edges,
            TopoKind::Face => &mut self.faces,
            TopoKind::Object => &mut self.objects,
        }
    }

    /// 四个计数均为0
    pub fn is_empty(&self) -> bool {
        self.vertices == 0 && self.edges == 0 && self.faces == 0 && self.objects == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection() {
        let counts = SelectionCounts::from_selection(&Vec::<SelectedItem>::new());
        assert_eq!(counts, SelectionCounts::new(0, 0, 0, 0));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_count_sub_elements() {
        let selection = vec![
            SelectedItem::with_sub_elements("Doc", "Box", ["Edge1", "Edge2", "Face6", "Vertex3"]),
            SelectedItem::with_sub_elements("Doc", "Cylinder", ["Edge1"]),
            SelectedItem::object("Doc", "Sketch"),
            SelectedItem::object("Doc", "Body"),
        ];

        let counts = SelectionCounts::from_selection(&selection);
        assert_eq!(counts, SelectionCounts::new(1, 3, 1, 2));
    }

    #[test]
    fn test_unrecognized_prefixes_are_ignored() {
        let selection = vec![SelectedItem::with_sub_elements(
            "Doc",
            "Sketch",
            ["edge1", "Wire1", "RootPoint", "H_Axis", "Constraint2"],
        )];

        let counts = SelectionCounts::from_selection(&selection);
        assert!(counts.is_empty());
    }
}
