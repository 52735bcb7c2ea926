//! 命令标识符
//!
//! 宿主命令按约定命名为 `<Workbench>_<Action>`，前缀为空表示核心命令。

use std::fmt;

/// 命令所属工作台的前缀，空前缀返回 "None"
pub fn workbench_of(command: &str) -> &str {
    match command.split('_').next() {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => "None",
    }
}

/// 把命令前缀映射为需要激活的工作台模块名
///
/// 核心命令（"None"、"Std"）不需要激活任何工作台。
pub fn workbench_module(prefix: &str) -> Option<String> {
    match prefix {
        "" | "None" | "Std" => None,
        "FEM" => Some("Fem".to_string()),
        p if p.starts_with("SM") => Some("SM".to_string()),
        p => Some(p.to_string()),
    }
}

/// 工作台类名，例如 "Part" -> "PartWorkbench"
pub fn workbench_class(module: &str) -> String {
    format!("{}Workbench", module)
}

/// 饼菜单与宿主工具栏的关联
///
/// 存储格式为 `"Wb1, Wb2: ToolbarName"`；旧数据可能只有工具栏名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarLink {
    /// 工具栏中命令所属的工作台前缀
    pub workbenches: Vec<String>,

    /// 工具栏名
    pub toolbar: String,
}

impl ToolbarLink {
    pub fn new(toolbar: impl Into<String>) -> Self {
        Self {
            workbenches: Vec::new(),
            toolbar: toolbar.into(),
        }
    }

    /// 根据工具栏中的命令收集工作台
    pub fn from_commands<'a, I>(toolbar: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut workbenches: Vec<String> = Vec::new();
        for command in commands {
            let wb = workbench_of(command);
            if !workbenches.iter().any(|w| w == wb) {
                workbenches.push(wb.to_string());
            }
        }

        Self {
            workbenches,
            toolbar: toolbar.into(),
        }
    }

    /// 解析存储的描述
    pub fn parse(descriptor: &str) -> Self {
        match descriptor.split_once(": ") {
            Some((workbenches, toolbar)) => Self {
                workbenches: workbenches
                    .split(", ")
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
                toolbar: toolbar.to_string(),
            },
            None => Self::new(descriptor),
        }
    }

    /// 需要激活的工作台模块
    pub fn modules(&self) -> impl Iterator<Item = String> + '_ {
        self.workbenches.iter().filter_map(|w| workbench_module(w))
    }
}

impl fmt::Display for ToolbarLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.workbenches.join(", "), self.toolbar)
    }
}
