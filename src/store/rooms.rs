use super::{contains_pattern, Result};
use crate::common::{Room, RoomName, Topic, UserRef};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const ROOM_SELECT: &str = "SELECT r.id, r.name, r.description, r.updated, r.created,
        h.id, h.username, t.id, t.name
    FROM rooms r
    LEFT JOIN users h ON h.id = r.host_id
    LEFT JOIN topics t ON t.id = r.topic_id";

const ROOM_ORDER: &str = "ORDER BY r.created DESC, r.updated DESC, r.id DESC";

fn room_from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    let host = match (row.get::<_, Option<i64>>(5)?, row.get::<_, Option<String>>(6)?) {
        (Some(id), Some(username)) => Some(UserRef { id, username }),
        _ => None,
    };
    let topic = match (row.get::<_, Option<i64>>(7)?, row.get::<_, Option<String>>(8)?) {
        (Some(id), Some(name)) => Some(Topic { id, name }),
        _ => None,
    };
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        updated: row.get(3)?,
        created: row.get(4)?,
        host,
        topic,
    })
}

fn query_rooms(conn: &Connection, sql: &str, params: impl Params) -> Result<Vec<Room>> {
    let mut stmt = conn.prepare(sql)?;
    let rooms = stmt
        .query_map(params, room_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

pub fn create_room(
    conn: &Connection,
    host_id: i64,
    topic: &Topic,
    name: &RoomName,
    description: Option<&str>,
) -> Result<Room> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO rooms (host_id, topic_id, name, description, updated, created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![host_id, topic.id, name.room_name(), description, now],
    )?;
    let id = conn.last_insert_rowid();
    Ok(conn.query_row(&format!("{ROOM_SELECT} WHERE r.id = ?1"), [id], room_from_row)?)
}

pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>> {
    Ok(conn
        .query_row(&format!("{ROOM_SELECT} WHERE r.id = ?1"), [id], room_from_row)
        .optional()?)
}

/// Rooms whose topic, name, host or description contain `query`, ignoring case.
/// An empty query matches every room.
pub fn search_rooms(conn: &Connection, query: &str) -> Result<Vec<Room>> {
    let sql = format!(
        r"{ROOM_SELECT}
        WHERE ?1 = ''
           OR t.name LIKE ?2 ESCAPE '\'
           OR r.name LIKE ?2 ESCAPE '\'
           OR h.username LIKE ?2 ESCAPE '\'
           OR r.description LIKE ?2 ESCAPE '\'
        {ROOM_ORDER}"
    );
    query_rooms(conn, &sql, params![query, contains_pattern(query)])
}

pub fn rooms_hosted_by(conn: &Connection, user_id: i64) -> Result<Vec<Room>> {
    query_rooms(
        conn,
        &format!("{ROOM_SELECT} WHERE r.host_id = ?1 {ROOM_ORDER}"),
        [user_id],
    )
}

pub fn count_rooms(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?)
}

/// Replaces the editable fields of a room and bumps `updated`.
pub fn update_room(
    conn: &Connection,
    id: i64,
    topic: &Topic,
    name: &RoomName,
    description: Option<&str>,
) -> Result<Option<Room>> {
    let changed = conn.execute(
        "UPDATE rooms SET topic_id = ?1, name = ?2, description = ?3, updated = ?4 WHERE id = ?5",
        params![topic.id, name.room_name(), description, Utc::now(), id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_room(conn, id)
}

/// Deletes the room along with its messages and participant links.
pub fn delete_room(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM rooms WHERE id = ?1", [id])? > 0)
}

pub fn add_participant(conn: &Connection, room_id: i64, user_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO room_participants (room_id, user_id) VALUES (?1, ?2)",
        [room_id, user_id],
    )?;
    Ok(())
}

pub fn participants(conn: &Connection, room_id: i64) -> Result<Vec<UserRef>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username FROM room_participants p
         JOIN users u ON u.id = p.user_id
         WHERE p.room_id = ?1
         ORDER BY u.username",
    )?;
    let users = stmt
        .query_map([room_id], |row| {
            Ok(UserRef {
                id: row.get(0)?,
                username: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{MessageBody, TopicName};
    use crate::store::{messages, test_support, topics};

    #[test]
    fn create_room_embeds_host_and_topic() {
        let conn = test_support::connection();
        let host = test_support::user(&conn, "jane");
        let topic = test_support::topic(&conn, "Go");

        let room = create_room(
            &conn,
            host.id,
            &topic,
            &RoomName::parse("Gophers").unwrap(),
            Some("all things go"),
        )
        .unwrap();

        assert_eq!(room.host.as_ref().map(|h| h.username.as_str()), Some("jane"));
        assert_eq!(room.topic, Some(topic));
        assert_eq!(room.description.as_deref(), Some("all things go"));
        assert!(room.is_hosted_by(&host));
        assert_eq!(get_room(&conn, room.id).unwrap(), Some(room));
        assert_eq!(get_room(&conn, 42).unwrap(), None);
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let conn = test_support::connection();
        let kim = test_support::user(&conn, "kim");
        let leo = test_support::user(&conn, "leo");
        let python = test_support::room(&conn, &kim, "Python", "Snakes");
        let web = test_support::room(&conn, &leo, "Web", "Frontend talk");
        let topic = topics::get_or_create_topic(&conn, &TopicName::parse("Misc").unwrap()).unwrap();
        let misc = create_room(
            &conn,
            kim.id,
            &topic,
            &RoomName::parse("Lounge").unwrap(),
            Some("100% off-topic"),
        )
        .unwrap();

        let ids = |q: &str| -> Vec<i64> {
            search_rooms(&conn, q)
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect()
        };

        assert_eq!(ids("PYTHON"), vec![python.id]);
        assert_eq!(ids("front"), vec![web.id]);
        assert_eq!(ids("LEO"), vec![web.id]);
        assert_eq!(ids("0% off"), vec![misc.id]);
        assert_eq!(ids("%"), vec![misc.id]);
        assert!(ids("zzz").is_empty());
        // newest first
        assert_eq!(ids(""), vec![misc.id, web.id, python.id]);
        assert_eq!(count_rooms(&conn).unwrap(), 3);
    }

    #[test]
    fn update_room_replaces_fields() {
        let conn = test_support::connection();
        let host = test_support::user(&conn, "max");
        let room = test_support::room(&conn, &host, "old", "Before");
        let topic = test_support::topic(&conn, "new");

        let updated = update_room(
            &conn,
            room.id,
            &topic,
            &RoomName::parse("After").unwrap(),
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(updated.name, "After");
        assert_eq!(updated.topic.map(|t| t.name), Some("new".to_string()));
        assert!(updated.updated >= room.updated);
        assert_eq!(updated.created, room.created);

        assert_eq!(
            update_room(&conn, 77, &topic, &RoomName::parse("x").unwrap(), None).unwrap(),
            None
        );
    }

    #[test]
    fn participants_are_unique_and_deleted_with_room() {
        let conn = test_support::connection();
        let host = test_support::user(&conn, "nina");
        let guest = test_support::user(&conn, "omar");
        let room = test_support::room(&conn, &host, "chat", "Lobby");

        add_participant(&conn, room.id, guest.id).unwrap();
        add_participant(&conn, room.id, guest.id).unwrap();
        add_participant(&conn, room.id, host.id).unwrap();
        let names: Vec<_> = participants(&conn, room.id)
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["nina", "omar"]);

        let body = MessageBody::parse(Some("hello")).unwrap();
        messages::create_message(&conn, guest.id, room.id, &body).unwrap();

        assert!(delete_room(&conn, room.id).unwrap());
        assert!(!delete_room(&conn, room.id).unwrap());
        assert!(participants(&conn, room.id).unwrap().is_empty());
        assert!(messages::room_messages(&conn, room.id).unwrap().is_empty());
        assert!(rooms_hosted_by(&conn, host.id).unwrap().is_empty());
    }
}
