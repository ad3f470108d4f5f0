use super::Result;
use crate::common::{Topic, TopicName, TopicSummary};

use rusqlite::{params, Connection};

pub fn get_or_create_topic(conn: &Connection, name: &TopicName) -> Result<Topic> {
    conn.execute(
        "INSERT OR IGNORE INTO topics (name) VALUES (?1)",
        [name.topic_name()],
    )?;
    Ok(conn.query_row(
        "SELECT id, name FROM topics WHERE name = ?1",
        [name.topic_name()],
        |row| {
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )?)
}

pub fn list_topics(conn: &Connection) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare("SELECT id, name FROM topics ORDER BY id")?;
    let topics = stmt
        .query_map([], |row| {
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(topics)
}

/// Topics with their room counts, busiest first. `name` filters by exact name.
pub fn topic_summaries(
    conn: &Connection,
    name: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<TopicSummary>> {
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, COUNT(r.id) AS num_rooms
         FROM topics t LEFT JOIN rooms r ON r.topic_id = t.id
         WHERE ?1 IS NULL OR t.name = ?1
         GROUP BY t.id, t.name
         ORDER BY num_rooms DESC, t.id ASC
         LIMIT ?2",
    )?;
    let topics = stmt
        .query_map(params![name, limit], |row| {
            Ok(TopicSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                num_rooms: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(topics)
}
