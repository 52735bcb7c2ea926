//! SQLite 参数存储
//!
//! 单表存储，每个参数一行：
//! - 组路径以 `/` 连接
//! - 值以文本保存，按类型解码
//! - 每次写入立即生效，没有事务批处理

use crate::error::StoreError;
use crate::param::{ParamKind, ParamPath, ParamStore, ParamValue};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::info;

/// 创建数据库架构
fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS params (
            group_path TEXT NOT NULL,
            kind TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (group_path, kind, key)
        );

        CREATE INDEX IF NOT EXISTS idx_params_group ON params(group_path);
        "#,
    )?;

    Ok(())
}

/// SQLite 参数存储
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// 打开（或创建）参数数据库文件
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        info!("Opened parameter database: {}", path.display());
        Ok(Self { conn })
    }

    /// 内存数据库，主要用于测试
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    fn child_prefix(group: &ParamPath) -> String {
        if group.is_root() {
            String::new()
        } else {
            format!("{}/", group)
        }
    }
}

impl ParamStore for SqliteStore {
    fn get(&self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<Option<ParamValue>, StoreError> {
        let text: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM params WHERE group_path = ?1 AND kind = ?2 AND key = ?3",
                params![group.to_string(), kind.as_str(), key],
                |row| row.get(0),
            )
            .optional()?;

        text.map(|t| ParamValue::decode(kind, key, &t)).transpose()
    }

    fn set(&mut self, group: &ParamPath, key: &str, value: ParamValue) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO params (group_path, kind, key, value) VALUES (?1, ?2, ?3, ?4)",
            params![group.to_string(), value.kind().as_str(), key, value.encode()],
        )?;
        Ok(())
    }

    fn remove(&mut self, group: &ParamPath, kind: ParamKind, key: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM params WHERE group_path = ?1 AND kind = ?2 AND key = ?3",
            params![group.to_string(), kind.as_str(), key],
        )?;
        Ok(())
    }

    fn remove_group(&mut self, group: &ParamPath) -> Result<(), StoreError> {
        if group.is_root() {
            self.conn.execute("DELETE FROM params", [])?;
            return Ok(());
        }

        let prefix = Self::child_prefix(group);
        self.conn.execute(
            "DELETE FROM params WHERE group_path = ?1 OR substr(group_path, 1, length(?2)) = ?2",
            params![group.to_string(), prefix],
        )?;
        Ok(())
    }

    fn keys(&self, group: &ParamPath, kind: ParamKind) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM params WHERE group_path = ?1 AND kind = ?2 ORDER BY key")?;
        let rows = stmt.query_map(params![group.to_string(), kind.as_str()], |row| row.get::<_, String>(0))?;
        let keys = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn groups(&self, group: &ParamPath) -> Result<Vec<String>, StoreError> {
        let prefix = Self::child_prefix(group);
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT group_path FROM params \
             WHERE group_path <> '' AND substr(group_path, 1, length(?1)) = ?1 \
             ORDER BY group_path",
        )?;
        let rows = stmt.query_map(params![prefix], |row| row.get::<_, String>(0))?;
        let paths = rows.collect::<Result<Vec<_>, _>>()?;

        let mut names: Vec<String> = Vec::new();
        for path in &paths {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let Some(name) = rest.split('/').next().filter(|n| !n.is_empty()) else {
                continue;
            };
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
