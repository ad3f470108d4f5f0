//! SQLite persistence for users, topics, rooms, messages and sessions.
//!
//! The query functions in the submodules are synchronous and take a plain
//! `&Connection`, so they compose inside a transaction. Async callers go
//! through [`Database::call`], which runs the closure on the blocking pool.
mod error;
pub mod messages;
pub mod rooms;
mod schema;
pub mod sessions;
pub mod topics;
pub mod users;

pub use error::StoreError;
use error::Result;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking thread pool.
    pub async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&mut *conn)
        })
        .await?
    }
}

/// Builds a `LIKE` pattern matching `query` anywhere, with `\` as the escape.
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::schema;
    use crate::common::{Room, RoomName, Topic, TopicName, User, UserName};

    use rusqlite::Connection;

    pub fn connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();
        conn
    }

    pub fn user(conn: &Connection, name: &str) -> User {
        super::users::create_user(conn, &UserName::parse(name).unwrap(), "", "hash").unwrap()
    }

    pub fn topic(conn: &Connection, name: &str) -> Topic {
        super::topics::get_or_create_topic(conn, &TopicName::parse(name).unwrap()).unwrap()
    }

    pub fn room(conn: &Connection, host: &User, topic: &str, name: &str) -> Room {
        let topic = self::topic(conn, topic);
        super::rooms::create_room(
            conn,
            host.id,
            &topic,
            &RoomName::parse(name).unwrap(),
            None,
        )
        .unwrap()
    }
}
