//! History Store for keyweb.
//!
//! An append-only log of visited addresses and issued searches, backed by
//! SQLite via `rusqlite`. Every visit is its own row; ranking is computed at
//! query time by grouping rows on `scheme:address` and ordering by visit
//! count, then by the most recent visit.

use std::path::Path;

use chrono::{DateTime, Months, Utc};
use rusqlite::{params, params_from_iter, OptionalExtension};
use tracing::{debug, info, warn};

use crate::database::connection::Database;
use crate::platform;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryRecord;

/// Maximum number of rows returned by [`HistoryStoreTrait::search`].
pub const SEARCH_LIMIT: usize = 500;

/// File name of the history database inside the data directory.
pub const HISTORY_FILE_NAME: &str = "history";

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn append(&self, scheme: &str, address: &str) -> Result<(), HistoryError>;
    fn search(&self, tokens: &[String]) -> Vec<String>;
    fn first_forward_match(&self, query: &str) -> String;
    fn expand_abridged_address(&self, addr: &str) -> String;
    fn prune_expired(&self) -> Result<usize, HistoryError>;
}

/// History store owning its SQLite database.
///
/// Expired records are pruned when the store is closed or dropped.
pub struct HistoryStore {
    db: Database,
    closed: bool,
}

impl HistoryStore {
    /// Wraps an already opened database.
    pub fn new(db: Database) -> Self {
        Self { db, closed: false }
    }

    /// Opens (or creates) the history database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let db = Database::open(path)
            .map_err(|e| HistoryError::Open(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "opened history store");
        Ok(Self::new(db))
    }

    /// Opens the history database at the per-user data location.
    pub fn open_default() -> Result<Self, HistoryError> {
        Self::open(Self::default_path())
    }

    /// Opens a history store that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let db = Database::open_in_memory().map_err(|e| HistoryError::Open(e.to_string()))?;
        Ok(Self::new(db))
    }

    /// Returns `<data dir>/history`.
    pub fn default_path() -> std::path::PathBuf {
        platform::get_data_dir().join(HISTORY_FILE_NAME)
    }

    /// Current time in milliseconds since the UNIX epoch.
    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// The timestamp for a new visit: now, or one past the newest record if
    /// that is later, so visits within one millisecond stay distinct.
    fn next_timestamp(&self) -> Result<i64, HistoryError> {
        let newest: Option<i64> = self
            .db
            .connection()
            .query_row("SELECT MAX(timestamp) FROM history", [], |row| row.get(0))?;
        let now = Self::now_millis();
        Ok(match newest {
            Some(newest) if newest >= now => newest + 1,
            _ => now,
        })
    }

    /// Inserts a record with an explicit timestamp.
    ///
    /// A record whose timestamp is already taken is silently dropped.
    pub fn append_at(&self, timestamp: i64, scheme: &str, address: &str) -> Result<(), HistoryError> {
        let inserted = self.db.connection().execute(
            "INSERT OR IGNORE INTO history (timestamp, scheme, address) VALUES (?1, ?2, ?3)",
            params![timestamp, scheme, address],
        )?;
        if inserted == 0 {
            debug!(timestamp, scheme, "history timestamp collision, record dropped");
        }
        Ok(())
    }

    /// Deletes every record strictly older than `cutoff`.
    ///
    /// Returns the number of deleted records.
    pub fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize, HistoryError> {
        let deleted = self.db.connection().execute(
            "DELETE FROM history WHERE timestamp < ?1",
            params![cutoff.timestamp_millis()],
        )?;
        Ok(deleted)
    }

    /// Deletes every record older than one calendar year before `now`.
    ///
    /// A record exactly one year old is kept.
    pub fn prune_expired_at(&self, now: DateTime<Utc>) -> Result<usize, HistoryError> {
        let cutoff = now
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| HistoryError::Database(format!("no retention cutoff for {}", now)))?;
        self.prune_before(cutoff)
    }

    /// Number of stored records (visits, not distinct addresses).
    pub fn len(&self) -> usize {
        match self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get::<_, i64>(0))
        {
            Ok(n) => n as usize,
            Err(e) => {
                warn!(error = %e, "history count failed");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every record, oldest first.
    pub fn records(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT timestamp, scheme, address FROM history ORDER BY timestamp ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(HistoryRecord {
                timestamp: row.get(0)?,
                scheme: row.get(1)?,
                address: row.get(2)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Prunes expired records and closes the store.
    pub fn close(mut self) -> Result<usize, HistoryError> {
        self.closed = true;
        self.prune_expired()
    }

    fn try_search(&self, tokens: &[&str]) -> Result<Vec<String>, HistoryError> {
        let predicates = vec!["address LIKE ? ESCAPE '\\'"; tokens.len()].join(" AND ");
        let sql = format!(
            "SELECT scheme || ':' || address AS uri FROM history WHERE {} \
             GROUP BY uri ORDER BY COUNT(timestamp) DESC, MAX(timestamp) DESC LIMIT {}",
            predicates, SEARCH_LIMIT
        );
        let patterns = tokens.iter().map(|t| format!("%{}%", escape_like(t)));

        let mut stmt = self.db.connection().prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(patterns), |row| row.get::<_, String>(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn try_first_forward_match(&self, query: &str) -> Result<Option<(String, String)>, HistoryError> {
        let pattern = format!("{}%", escape_like(query));
        let found = self
            .db
            .connection()
            .query_row(
                r"SELECT scheme, address, scheme || ':' || address AS uri FROM history
                  WHERE (scheme = 'search' AND address LIKE ?1 ESCAPE '\')
                     OR (scheme != 'search' AND scheme != 'file'
                         AND (CASE WHEN substr(address, 1, 2) = '//' THEN substr(address, 3)
                                   ELSE address END) LIKE ?1 ESCAPE '\')
                     OR (scheme IN ('http', 'https') AND substr(address, 1, 6) = '//www.'
                         AND substr(address, 7) LIKE ?1 ESCAPE '\')
                  GROUP BY uri ORDER BY COUNT(timestamp) DESC, MAX(timestamp) DESC LIMIT 1",
                params![pattern],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(found)
    }

    fn try_expand_abridged_address(&self, addr: &str) -> Result<Option<String>, HistoryError> {
        let found = self
            .db
            .connection()
            .query_row(
                "SELECT scheme, address FROM history \
                 WHERE address = '//' || ?1 OR address = '//www.' || ?1 \
                 ORDER BY timestamp DESC LIMIT 1",
                params![addr],
                |row| Ok(format!("{}:{}", row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(found)
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Records one visit at the current time.
    ///
    /// Visits made within the same millisecond get consecutive timestamps.
    fn append(&self, scheme: &str, address: &str) -> Result<(), HistoryError> {
        let timestamp = self.next_timestamp()?;
        self.append_at(timestamp, scheme, address)
    }

    /// Returns `scheme:address` values whose address contains every token
    /// (case-insensitive), most visited first, then most recent.
    ///
    /// No tokens means no results.
    fn search(&self, tokens: &[String]) -> Vec<String> {
        let tokens: Vec<&str> = tokens
            .iter()
            .map(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        self.try_search(&tokens).unwrap_or_else(|e| {
            warn!(error = %e, "history search failed");
            Vec::new()
        })
    }

    /// Returns the best-ranked address that `query` is a prefix of, trimmed so
    /// that it starts at the typed text, or an empty string.
    ///
    /// Search records are returned verbatim. Other records have the scheme
    /// separator (`//`) and an optional `www.` skipped when matching.
    fn first_forward_match(&self, query: &str) -> String {
        let found = match self.try_first_forward_match(query) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "history forward match failed");
                return String::new();
            }
        };

        match found {
            Some((scheme, address)) if scheme == "search" => address,
            Some((_, address)) => match find_ignore_case(&address, query) {
                Some(start) => address[start..].to_string(),
                None => address,
            },
            None => String::new(),
        }
    }

    /// Expands a bare host into a full address using the most recent visit
    /// to `//addr` or `//www.addr`, falling back to `http://addr`.
    fn expand_abridged_address(&self, addr: &str) -> String {
        match self.try_expand_abridged_address(addr) {
            Ok(Some(full)) => full,
            Ok(None) => format!("http://{}", addr),
            Err(e) => {
                warn!(error = %e, "history address expansion failed");
                format!("http://{}", addr)
            }
        }
    }

    /// Deletes records older than one year from now.
    fn prune_expired(&self) -> Result<usize, HistoryError> {
        let deleted = self.prune_expired_at(Utc::now())?;
        if deleted > 0 {
            info!(deleted, "pruned expired history records");
        }
        Ok(deleted)
    }
}

impl Drop for HistoryStore {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.prune_expired() {
            warn!(error = %e, "failed to prune history on shutdown");
        }
    }
}

/// Escapes `LIKE` metacharacters so user text only matches literally.
///
/// Pair with `ESCAPE '\'` in the statement.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some(0);
    }
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        let mut rest = haystack[i..].chars().flat_map(char::to_lowercase);
        needle.iter().all(|n| rest.next() == Some(*n))
    })
}
