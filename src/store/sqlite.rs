use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use url::Url;

use crate::app::{FeedsyncError, Result};
use crate::domain::{News, NewsDetail, Rule, SourceRecord};
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| FeedsyncError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            FeedsyncError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

impl Store for SqliteStore {
    fn create_source(&self, url: &str, rule: &str) -> Result<i64> {
        let parsed = Url::parse(url)?;
        if parsed.cannot_be_a_base() {
            return Err(FeedsyncError::InvalidArgument(format!(
                "not an absolute URL: {}",
                url
            )));
        }
        // Reject rules that would never produce a usable source.
        Rule::compile(rule)?;

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO sources (url, rule, created_at) VALUES (?1, ?2, ?3)",
            params![url, rule, Utc::now().to_rfc3339()],
        );

        match inserted {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(e) if Self::is_unique_violation(&e) => {
                Err(FeedsyncError::DuplicateSource(url.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_sources(&self) -> Result<Vec<SourceRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare("SELECT id, url, rule, created_at FROM sources ORDER BY id")?;

        let sources = stmt
            .query_map([], |row| {
                Ok(SourceRecord {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    rule: row.get(2)?,
                    created_at: row
                        .get::<_, String>(3)
                        .ok()
                        .and_then(|s| Self::parse_datetime(&s))
                        .unwrap_or_else(Utc::now),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sources)
    }

    fn create_news(&self, source_id: i64, title: &str, payload_json: &str) -> Result<()> {
        if title.is_empty() && payload_json.is_empty() {
            return Err(FeedsyncError::InvalidArgument(
                "news needs a title or a payload".into(),
            ));
        }

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO news (source_id, title, payload_json, added_at) VALUES (?1, ?2, ?3, ?4)",
            params![source_id, title, payload_json, Utc::now().to_rfc3339()],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(e) if Self::is_unique_violation(&e) => {
                Err(FeedsyncError::DuplicateNews(title.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_news(&self, offset: usize, count: usize) -> Result<Vec<News>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT n.id, n.title, s.url FROM news n
             LEFT JOIN sources s ON n.source_id = s.id
             ORDER BY n.added_at ASC, n.id ASC
             LIMIT ?1 OFFSET ?2",
        )?;

        let news = stmt
            .query_map(params![count as i64, offset as i64], |row| {
                Ok(News {
                    id: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(news)
    }

    fn get_news_with_title(&self, title: &str, offset: usize, count: usize) -> Result<Vec<News>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT n.id, n.title, s.url FROM news n
             LEFT JOIN sources s ON n.source_id = s.id
             WHERE n.title LIKE ?1
             ORDER BY n.added_at ASC, n.id ASC
             LIMIT ?2 OFFSET ?3",
        )?;

        let pattern = format!("%{}%", title);
        let news = stmt
            .query_map(params![pattern, count as i64, offset as i64], |row| {
                Ok(News {
                    id: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(news)
    }

    fn get_news_detail(&self, id: i64) -> Result<NewsDetail> {
        let conn = self.conn()?;

        let detail = conn
            .query_row(
                "SELECT n.title, n.payload_json, s.url FROM news n
                 LEFT JOIN sources s ON n.source_id = s.id
                 WHERE n.id = ?1",
                params![id],
                |row| {
                    Ok(NewsDetail {
                        title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                        payload_json: row.get(1)?,
                        source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;

        detail.ok_or(FeedsyncError::NewsNotFound(id))
    }
}
