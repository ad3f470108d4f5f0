use super::{contains_pattern, Result};
use crate::common::{Message, MessageBody, RoomRef, UserRef};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const MESSAGE_SELECT: &str = "SELECT m.id, m.body, m.updated, m.created,
        u.id, u.username, r.id, r.name
    FROM messages m
    JOIN users u ON u.id = m.user_id
    JOIN rooms r ON r.id = m.room_id";

const MESSAGE_ORDER: &str = "ORDER BY m.updated DESC, m.created DESC, m.id DESC";

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        body: row.get(1)?,
        updated: row.get(2)?,
        created: row.get(3)?,
        user: UserRef {
            id: row.get(4)?,
            username: row.get(5)?,
        },
        room: RoomRef {
            id: row.get(6)?,
            name: row.get(7)?,
        },
    })
}

fn query_messages(conn: &Connection, sql: &str, params: impl Params) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;
    let messages = stmt
        .query_map(params, message_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(messages)
}

pub fn create_message(
    conn: &Connection,
    user_id: i64,
    room_id: i64,
    body: &MessageBody,
) -> Result<Message> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO messages (user_id, room_id, body, updated, created) VALUES (?1, ?2, ?3, ?4, ?4)",
        params![user_id, room_id, body.as_str(), now],
    )?;
    let id = conn.last_insert_rowid();
    Ok(conn.query_row(
        &format!("{MESSAGE_SELECT} WHERE m.id = ?1"),
        [id],
        message_from_row,
    )?)
}

pub fn get_message(conn: &Connection, id: i64) -> Result<Option<Message>> {
    Ok(conn
        .query_row(
            &format!("{MESSAGE_SELECT} WHERE m.id = ?1"),
            [id],
            message_from_row,
        )
        .optional()?)
}

pub fn delete_message(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM messages WHERE id = ?1", [id])? > 0)
}

pub fn room_messages(conn: &Connection, room_id: i64) -> Result<Vec<Message>> {
    query_messages(
        conn,
        &format!("{MESSAGE_SELECT} WHERE m.room_id = ?1 {MESSAGE_ORDER}"),
        [room_id],
    )
}

pub fn messages_by_user(conn: &Connection, user_id: i64) -> Result<Vec<Message>> {
    query_messages(
        conn,
        &format!("{MESSAGE_SELECT} WHERE m.user_id = ?1 {MESSAGE_ORDER}"),
        [user_id],
    )
}

/// Most recently updated messages. A non-empty `query` keeps only messages whose
/// room topic, author or body contain it, ignoring case.
pub fn recent_messages(
    conn: &Connection,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<Message>> {
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let sql = format!(
        r"{MESSAGE_SELECT}
        LEFT JOIN topics t ON t.id = r.topic_id
        WHERE ?1 = ''
           OR t.name LIKE ?2 ESCAPE '\'
           OR u.username LIKE ?2 ESCAPE '\'
           OR m.body LIKE ?2 ESCAPE '\'
        {MESSAGE_ORDER}
        LIMIT ?3"
    );
    query_messages(conn, &sql, params![query, contains_pattern(query), limit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support;

    fn post(conn: &Connection, user_id: i64, room_id: i64, body: &str) -> Message {
        create_message(conn, user_id, room_id, &MessageBody::parse(Some(body)).unwrap()).unwrap()
    }

    #[test]
    fn messages_are_listed_newest_first() {
        let conn = test_support::connection();
        let pat = test_support::user(&conn, "pat");
        let room = test_support::room(&conn, &pat, "news", "Daily");

        let first = post(&conn, pat.id, room.id, "first");
        let second = post(&conn, pat.id, room.id, "second");

        let ids: Vec<_> = room_messages(&conn, room.id)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(second.room.name, "Daily");
        assert_eq!(second.user.username, "pat");
        assert!(second.is_authored_by(&pat));
    }

    #[test]
    fn recent_messages_filter_and_limit() {
        let conn = test_support::connection();
        let quinn = test_support::user(&conn, "quinn");
        let rita = test_support::user(&conn, "rita");
        let rust = test_support::room(&conn, &quinn, "Rust", "Crabs");
        let cooking = test_support::room(&conn, &rita, "Cooking", "Kitchen");

        let borrow = post(&conn, quinn.id, rust.id, "borrow checker");
        let pasta = post(&conn, rita.id, cooking.id, "pasta night");
        let under = post(&conn, rita.id, cooking.id, "50_50 mix");

        let ids = |q: &str, limit: Option<usize>| -> Vec<i64> {
            recent_messages(&conn, q, limit)
                .unwrap()
                .into_iter()
                .map(|m| m.id)
                .collect()
        };

        assert_eq!(ids("", None), vec![under.id, pasta.id, borrow.id]);
        assert_eq!(ids("", Some(2)), vec![under.id, pasta.id]);
        assert_eq!(ids("rust", None), vec![borrow.id]);
        assert_eq!(ids("RITA", None), vec![under.id, pasta.id]);
        assert_eq!(ids("PASTA", None), vec![pasta.id]);
        assert_eq!(ids("_", None), vec![under.id]);
    }

    #[test]
    fn messages_by_user_and_delete() {
        let conn = test_support::connection();
        let sam = test_support::user(&conn, "sam");
        let tia = test_support::user(&conn, "tia");
        let room = test_support::room(&conn, &sam, "misc", "Room");

        let mine = post(&conn, sam.id, room.id, "mine");
        post(&conn, tia.id, room.id, "theirs");

        let by_sam = messages_by_user(&conn, sam.id).unwrap();
        assert_eq!(by_sam.len(), 1);
        assert_eq!(by_sam[0].body, "mine");

        assert_eq!(get_message(&conn, mine.id).unwrap(), Some(mine.clone()));
        assert!(delete_message(&conn, mine.id).unwrap());
        assert_eq!(get_message(&conn, mine.id).unwrap(), None);
        assert!(!delete_message(&conn, mine.id).unwrap());
    }
}
