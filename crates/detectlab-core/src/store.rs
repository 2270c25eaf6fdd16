//! Read-only access to the experiment's abstract database.
//!
//! The database holds one `abstracts` table with the DOI, publication date,
//! original text and (once the rewriting pass is done) the rewritten text of
//! every abstract in the study.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sampler::Variant;

/// One row of the `abstracts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractRecord {
    pub doi: String,
    pub pub_date: String,
    pub original_text: String,
    pub rewritten_text: Option<String>,
}

impl AbstractRecord {
    /// Text for the requested variant, if present.
    pub fn text(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Original => Some(&self.original_text),
            Variant::Rewritten => self.rewritten_text.as_deref(),
        }
    }
}

pub struct AbstractStore {
    conn: Connection,
}

impl AbstractStore {
    /// Open an existing database without write access. A missing file is an
    /// error rather than a new empty database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("opened abstract database {}", path.display());
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Every abstract, in table order.
    pub fn all(&self) -> Result<Vec<AbstractRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT doi, pub_date, og_text, rep_text
             FROM abstracts ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AbstractRecord {
                doi: row.get(0)?,
                pub_date: row.get(1)?,
                original_text: row.get(2)?,
                rewritten_text: row.get(3)?,
            })
        })?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        log::info!("loaded {} abstracts", records.len());
        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM abstracts", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
