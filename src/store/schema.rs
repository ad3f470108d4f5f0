use super::Result;

use rusqlite::Connection;
use tracing::{debug, info};

const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    email       TEXT NOT NULL DEFAULT '',
    password    TEXT NOT NULL,
    date_joined TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS topics (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS rooms (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    host_id     INTEGER REFERENCES users(id) ON DELETE SET NULL,
    topic_id    INTEGER REFERENCES topics(id) ON DELETE SET NULL,
    name        TEXT NOT NULL,
    description TEXT,
    updated     TEXT NOT NULL,
    created     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS room_participants (
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    PRIMARY KEY (room_id, user_id)
);

CREATE TABLE IF NOT EXISTS messages (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    body    TEXT NOT NULL,
    updated TEXT NOT NULL,
    created TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    expires_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS rooms_host_idx ON rooms(host_id);
CREATE INDEX IF NOT EXISTS rooms_topic_idx ON rooms(topic_id);
CREATE INDEX IF NOT EXISTS messages_room_idx ON messages(room_id);
CREATE INDEX IF NOT EXISTS messages_user_idx ON messages(user_id);
CREATE INDEX IF NOT EXISTS sessions_expiry_idx ON sessions(expires_at);
";

/// Creates any missing tables. Safe to run against an existing database.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)?;

    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    debug!("Database schema version: {}", version);

    conn.execute_batch(SCHEMA)?;

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        info!("Database schema migrated to version {}", SCHEMA_VERSION);
    }
    Ok(())
}
