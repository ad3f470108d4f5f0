use super::{Result, StoreError};
use crate::common::{User, UserName};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT: &str = "SELECT id, username, email, date_joined FROM users";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        date_joined: row.get(3)?,
    })
}

pub fn create_user(
    conn: &Connection,
    username: &UserName,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO users (username, email, password, date_joined) VALUES (?1, ?2, ?3, ?4)",
        params![username.username(), email, password_hash, now],
    )
    .map_err(|e| StoreError::on_username(e, username))?;

    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        date_joined: now,
    })
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    Ok(conn
        .query_row(&format!("{USER_SELECT} WHERE id = ?1"), [id], user_from_row)
        .optional()?)
}

/// Looks a user up by name together with their stored password hash.
pub fn find_credentials(conn: &Connection, username: &UserName) -> Result<Option<(User, String)>> {
    Ok(conn
        .query_row(
            "SELECT id, username, email, date_joined, password FROM users WHERE username = ?1",
            [username.username()],
            |row| Ok((user_from_row(row)?, row.get(4)?)),
        )
        .optional()?)
}

pub fn update_user(
    conn: &Connection,
    id: i64,
    username: &UserName,
    email: &str,
) -> Result<Option<User>> {
    let changed = conn
        .execute(
            "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3",
            params![username.username(), email, id],
        )
        .map_err(|e| StoreError::on_username(e, username))?;
    if changed == 0 {
        return Ok(None);
    }
    get_user(conn, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support;

    #[test]
    fn create_and_find_user() {
        let conn = test_support::connection();
        let name = UserName::parse("Erin").unwrap();
        let user = create_user(&conn, &name, "erin@example.com", "pbkdf2_sha256$1$s$h").unwrap();

        assert_eq!(user.username, "erin");
        assert_eq!(get_user(&conn, user.id).unwrap(), Some(user.clone()));

        let (found, hash) = find_credentials(&conn, &name).unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "pbkdf2_sha256$1$s$h");
    }

    #[test]
    fn duplicate_username_is_reported() {
        let conn = test_support::connection();
        test_support::user(&conn, "frank");
        let result = create_user(&conn, &UserName::parse("FRANK").unwrap(), "", "x");
        assert!(matches!(result, Err(StoreError::UsernameTaken(name)) if name == "frank"));
    }

    #[test]
    fn update_user_changes_name_and_email() {
        let conn = test_support::connection();
        let user = test_support::user(&conn, "gina");
        test_support::user(&conn, "hank");

        let updated = update_user(&conn, user.id, &UserName::parse("gina2").unwrap(), "g@x.io")
            .unwrap()
            .unwrap();
        assert_eq!(updated.username, "gina2");
        assert_eq!(updated.email, "g@x.io");

        let clash = update_user(&conn, user.id, &UserName::parse("hank").unwrap(), "");
        assert!(matches!(clash, Err(StoreError::UsernameTaken(_))));

        assert_eq!(
            update_user(&conn, 999, &UserName::parse("nobody").unwrap(), "").unwrap(),
            None
        );
    }
}
