//! SQLite resource catalog
//!
//! Holds the resource records the engine reads and updates: UUID, owner,
//! location and tip snapshot size. Removal is a soft delete; deleted rows
//! stay in the table but are hidden from lookups.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

use fuelhub_core::{ResourceKind, ResourceRecord};

use crate::error::Result;

const COLUMNS: &str = "uuid, name, owner, kind, location, filesize, created_at, deleted_at";

/// SQLite store for resource records
pub struct ResourceCatalog {
    conn: Connection,
}

impl ResourceCatalog {
    /// Open or create the catalog at a specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        let mut catalog = Self { conn };
        catalog.init()?;
        Ok(catalog)
    }

    /// Open an in-memory catalog (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut catalog = Self { conn };
        catalog.init()?;
        Ok(catalog)
    }

    fn init(&mut self) -> Result<()> {
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;

        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                owner TEXT NOT NULL,
                kind TEXT NOT NULL,
                location TEXT NOT NULL,
                filesize INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                deleted_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_resources_owner ON resources(owner, kind);
            "#,
        )?;
        Ok(())
    }

    pub fn insert(&mut self, record: &ResourceRecord) -> Result<()> {
        self.conn.execute(
            &format!("INSERT INTO resources ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)", COLUMNS),
            params![
                record.uuid,
                record.name,
                record.owner,
                record.kind.to_string(),
                record.location.to_string_lossy().into_owned(),
                record.filesize as i64,
                timestamp(&record.created_at),
                record.deleted_at.as_ref().map(timestamp),
            ],
        )?;
        Ok(())
    }

    /// Live record by UUID
    pub fn get(&self, uuid: &str) -> Result<Option<ResourceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM resources WHERE uuid = ?1 AND deleted_at IS NULL",
            COLUMNS
        ))?;
        Ok(stmt.query_row([uuid], record_from_row).optional()?)
    }

    /// Live records, optionally restricted to one owner, oldest first
    pub fn list(&self, owner: Option<&str>) -> Result<Vec<ResourceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM resources
            WHERE deleted_at IS NULL AND (?1 IS NULL OR owner = ?1)
            ORDER BY created_at, name
            "#,
            COLUMNS
        ))?;

        let records = stmt
            .query_map([owner], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Returns `false` when no live record matched
    pub fn update_filesize(&mut self, uuid: &str, filesize: u64) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE resources SET filesize = ?1 WHERE uuid = ?2 AND deleted_at IS NULL",
            params![filesize as i64, uuid],
        )?;
        Ok(changed > 0)
    }

    pub fn update_location(&mut self, uuid: &str, owner: &str, location: &Path) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE resources SET owner = ?1, location = ?2 WHERE uuid = ?3 AND deleted_at IS NULL",
            params![owner, location.to_string_lossy().into_owned(), uuid],
        )?;
        Ok(changed > 0)
    }

    /// Mark a record deleted. Repository files are left on disk.
    pub fn soft_delete(&mut self, uuid: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE resources SET deleted_at = ?1 WHERE uuid = ?2 AND deleted_at IS NULL",
            params![timestamp(&Utc::now()), uuid],
        )?;
        Ok(changed > 0)
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

/// Fixed-width so rows sort chronologically as text
fn timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceRecord> {
    let kind: String = row.get(3)?;
    let kind: ResourceKind = kind
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let created_at: String = row.get(6)?;
    let deleted_at: Option<String> = row.get(7)?;

    Ok(ResourceRecord {
        uuid: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        kind,
        location: PathBuf::from(row.get::<_, String>(4)?),
        filesize: row.get::<_, i64>(5)? as u64,
        created_at: parse_time(6, &created_at)?,
        deleted_at: deleted_at.map(|d| parse_time(7, &d)).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(uuid: &str, owner: &str) -> ResourceRecord {
        ResourceRecord::new(
            uuid,
            format!("res-{}", uuid),
            owner,
            ResourceKind::Model,
            format!("/srv/fuel/{}/models/{}", owner, uuid),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut catalog = ResourceCatalog::open_memory().unwrap();
        let rec = record("u1", "alice");
        catalog.insert(&rec).unwrap();

        let loaded = catalog.get("u1").unwrap().unwrap();
        assert_eq!(loaded, rec);
        assert!(catalog.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_uuid_rejected() {
        let mut catalog = ResourceCatalog::open_memory().unwrap();
        catalog.insert(&record("u1", "alice")).unwrap();
        assert!(catalog.insert(&record("u1", "bob")).is_err());
    }

    #[test]
    fn test_list_by_owner() {
        let mut catalog = ResourceCatalog::open_memory().unwrap();
        catalog.insert(&record("u1", "alice")).unwrap();
        catalog.insert(&record("u2", "bob")).unwrap();
        catalog.insert(&record("u3", "alice")).unwrap();

        assert_eq!(catalog.list(None).unwrap().len(), 3);
        let alice: Vec<String> = catalog
            .list(Some("alice"))
            .unwrap()
            .into_iter()
            .map(|r| r.uuid)
            .collect();
        assert_eq!(alice, vec!["u1", "u3"]);
    }

    #[test]
    fn test_soft_delete_hides_record() {
        let mut catalog = ResourceCatalog::open_memory().unwrap();
        catalog.insert(&record("u1", "alice")).unwrap();

        assert!(catalog.soft_delete("u1").unwrap());
        assert!(!catalog.soft_delete("u1").unwrap());
        assert!(catalog.get("u1").unwrap().is_none());
        assert!(catalog.list(None).unwrap().is_empty());
        assert!(!catalog.update_filesize("u1", 10).unwrap());
    }

    #[test]
    fn test_updates() {
        let mut catalog = ResourceCatalog::open_memory().unwrap();
        catalog.insert(&record("u1", "alice")).unwrap();

        assert!(catalog.update_filesize("u1", 4096).unwrap());
        assert!(
            catalog
                .update_location("u1", "acme", Path::new("/srv/fuel/acme/models/u1"))
                .unwrap()
        );

        let loaded = catalog.get("u1").unwrap().unwrap();
        assert_eq!(loaded.filesize, 4096);
        assert_eq!(loaded.owner, "acme");
        assert_eq!(loaded.location, PathBuf::from("/srv/fuel/acme/models/u1"));
    }

    #[test]
    fn test_persists_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db").join("catalog.db");
        {
            let mut catalog = ResourceCatalog::open_at(&path).unwrap();
            catalog.insert(&record("u1", "alice")).unwrap();
        }
        let catalog = ResourceCatalog::open_at(&path).unwrap();
        assert_eq!(catalog.get("u1").unwrap().unwrap().owner, "alice");
    }
}
