use crate::search::SearchEngine;
use anyhow::{anyhow, bail};
use domain::models::ParagraphRecord;
use domain::ports::VectorStore;
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shared::types::Result;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// SQLite-backed paragraph store with exhaustive cosine search.
pub struct ParagraphStore {
    conn: Mutex<Connection>,
}

impl ParagraphStore {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
            CREATE TABLE IF NOT EXISTS paragraphs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );
        ",
        )
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("paragraph store connection poisoned"))
    }

    /// Dimension of the vectors already stored, or `None` for an empty store.
    fn stored_dimension(conn: &Connection) -> Result<Option<usize>> {
        let first: Option<Vec<u8>> = conn
            .query_row("SELECT embedding FROM paragraphs ORDER BY id LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        match first {
            Some(bytes) => Ok(Some(serde_json::from_slice::<Vec<f32>>(&bytes)?.len())),
            None => Ok(None),
        }
    }

    /// Every stored record in insertion order.
    pub fn all_records(&self) -> Result<Vec<ParagraphRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT text, embedding FROM paragraphs ORDER BY id")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            let embedding_bytes: Vec<u8> = row.get(1)?;
            let embedding: Vec<f32> = serde_json::from_slice(&embedding_bytes)?;
            records.push(ParagraphRecord { text, embedding });
        }
        Ok(records)
    }
}

impl VectorStore for ParagraphStore {
    fn insert(&self, record: &ParagraphRecord) -> Result<()> {
        let conn = self.conn()?;
        if let Some(stored) = Self::stored_dimension(&conn)? {
            if stored != record.dimension() {
                bail!(
                    "Embedding dimension mismatch: store holds {}, record has {}",
                    stored,
                    record.dimension()
                );
            }
        }
        let embedding_bytes = serde_json::to_vec(&record.embedding)?;
        conn.execute(
            "INSERT INTO paragraphs (text, embedding) VALUES (?1, ?2)",
            params![record.text, embedding_bytes],
        )?;
        debug!(chars = record.text.chars().count(), "Stored paragraph");
        Ok(())
    }

    fn vector_search(&self, query: &[f32], k: usize) -> Result<Vec<String>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let records = self.all_records()?;
        SearchEngine::find_relevant_paragraphs(query, &records, k)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM paragraphs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
