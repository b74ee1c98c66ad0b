use crate::model::{Keyword, StorageError};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database and creates missing tables. `":memory:"` gives a throwaway store.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS keywords (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                added_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notified_matches (
                day TEXT NOT NULL,
                source TEXT NOT NULL,
                line TEXT NOT NULL,
                notified_at TEXT NOT NULL,
                PRIMARY KEY (day, source, line)
            );
            ",
        )?;

        Ok(Self { conn })
    }

    /// Appends a keyword. Duplicates are kept.
    pub fn add_keyword(&self, text: &str) -> Result<(), StorageError> {
        if text.trim().is_empty() {
            return Err(StorageError::InvalidData("keyword is empty".into()));
        }
        self.conn.execute(
            "INSERT INTO keywords (text, added_at) VALUES (?1, ?2)",
            params![text, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// All keywords in the order they were added.
    pub fn list_keywords(&self) -> Result<Vec<Keyword>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT text FROM keywords ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keywords = Vec::new();
        for text in rows {
            keywords.push(Keyword::new(text?));
        }
        Ok(keywords)
    }

    /// Removes every keyword, returning how many were deleted.
    pub fn clear_keywords(&self) -> Result<usize, StorageError> {
        Ok(self.conn.execute("DELETE FROM keywords", [])?)
    }

    pub fn is_match_notified(&self, day: NaiveDate, source: &str, line: &str) -> Result<bool, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM notified_matches WHERE day = ?1 AND source = ?2 AND line = ?3")?;
        let mut rows = stmt.query(params![day, source, line])?;
        Ok(rows.next()?.is_some())
    }

    pub fn mark_match_notified(&self, day: NaiveDate, source: &str, line: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO notified_matches (day, source, line, notified_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![day, source, line, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Forgets notifications from days before `day`.
    pub fn prune_notified_before(&self, day: NaiveDate) -> Result<usize, StorageError> {
        Ok(self
            .conn
            .execute("DELETE FROM notified_matches WHERE day < ?1", params![day])?)
    }
}
