use super::Result;
use crate::common::User;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub fn create_session(
    conn: &Connection,
    token: &str,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, expires_at],
    )?;
    Ok(())
}

/// The user behind `token`, if the session exists and has not expired at `now`.
pub fn session_user(conn: &Connection, token: &str, now: DateTime<Utc>) -> Result<Option<User>> {
    Ok(conn
        .query_row(
            "SELECT u.id, u.username, u.email, u.date_joined
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token = ?1 AND s.expires_at > ?2",
            params![token, now],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    date_joined: row.get(3)?,
                })
            },
        )
        .optional()?)
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<()> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", [token])?;
    Ok(())
}

pub fn purge_expired(conn: &Connection, now: DateTime<Utc>) -> Result<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", [now])?)
}
