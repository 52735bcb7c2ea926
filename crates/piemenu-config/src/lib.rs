//! 饼菜单配置
//!
//! 支持：
//! - 分层的键值参数存储（内存/JSON 文件，或 SQLite）
//! - 饼菜单注册表：增删改名复制，所有修改立即写回存储
//! - 全局设置：当前饼菜单、上下文饼菜单、触发方式、工具栏关联

pub mod error;
pub mod layout;
pub mod memory;
pub mod param;
pub mod registry;
pub mod settings;
pub mod sqlite;

pub use error::{ConfigError, RegistryError, StoreError};
pub use memory::MemoryStore;
pub use param::{ParamKind, ParamPath, ParamStore, ParamValue};
pub use registry::{LoadReport, PieRegistry};
pub use settings::{Settings, TriggerMode};
pub use sqlite::SqliteStore;
