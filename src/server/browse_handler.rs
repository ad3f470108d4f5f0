use super::views::{ActivityPage, HomePage, TopicsPage};
use super::{AppState, Result};
use crate::store::{messages, rooms, topics};

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

/// How many topics the home page lists.
const HOME_TOPICS: usize = 4;
/// How many recent messages the home page lists.
const HOME_MESSAGES: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    q: Option<String>,
}

pub async fn home(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<HomePage>> {
    let query = search.q.unwrap_or_default();
    debug!("Home search: {:?}", query);

    let page = state
        .db
        .call(move |conn| {
            let rooms = rooms::search_rooms(conn, &query)?;
            Ok(HomePage {
                room_count: rooms.len(),
                total_rooms: rooms::count_rooms(conn)?,
                topics: topics::topic_summaries(conn, None, Some(HOME_TOPICS))?,
                room_messages: messages::recent_messages(conn, &query, Some(HOME_MESSAGES))?,
                rooms,
                query,
            })
        })
        .await?;
    Ok(Json(page))
}

/// Topic browser. Unlike the home search, `q` must match a topic name exactly.
pub async fn topics_page(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<TopicsPage>> {
    let query = search.q.filter(|q| !q.is_empty());

    let page = state
        .db
        .call(move |conn| {
            Ok(TopicsPage {
                topics: topics::topic_summaries(conn, query.as_deref(), None)?,
                total_rooms: rooms::count_rooms(conn)?,
            })
        })
        .await?;
    Ok(Json(page))
}

pub async fn activity(State(state): State<AppState>) -> Result<Json<ActivityPage>> {
    let room_messages = state
        .db
        .call(|conn| messages::recent_messages(conn, "", None))
        .await?;
    Ok(Json(ActivityPage { room_messages }))
}
