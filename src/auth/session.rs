use super::Result;
use crate::common::User;
use crate::store::{sessions, Database};

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{debug, info};

pub const SESSION_COOKIE: &str = "sessionid";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 14;

const TOKEN_LEN: usize = 32;
const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn new_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| char::from(TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())]))
        .collect()
}

/// Issues and resolves session tokens backed by the `sessions` table.
#[derive(Debug, Clone)]
pub struct Sessions {
    db: Database,
    ttl: Duration,
}

impl Sessions {
    pub fn new(db: Database, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    pub async fn start(&self, user: &User) -> Result<String> {
        let token = new_token();
        let expires_at = Utc::now() + self.ttl;
        let user_id = user.id;
        {
            let token = token.clone();
            self.db
                .call(move |conn| sessions::create_session(conn, &token, user_id, expires_at))
                .await?;
        }
        info!("Session started for {}", user.username);
        Ok(token)
    }

    pub async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let token = token.to_string();
        Ok(self
            .db
            .call(move |conn| sessions::session_user(conn, &token, Utc::now()))
            .await?)
    }

    pub async fn end(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        self.db
            .call(move |conn| sessions::delete_session(conn, &token))
            .await?;
        debug!("Session ended");
        Ok(())
    }

    pub async fn purge_expired(&self) -> Result<usize> {
        let purged = self
            .db
            .call(|conn| sessions::purge_expired(conn, Utc::now()))
            .await?;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserName;
    use crate::store::users;

    #[test]
    fn tokens_are_lowercase_alphanumeric() {
        let token = new_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(token, new_token());
    }

    #[tokio::test]
    async fn start_resolve_end() {
        let db = Database::open_in_memory().unwrap();
        let user = db
            .call(|conn| users::create_user(conn, &UserName::parse("vic").unwrap(), "", "h"))
            .await
            .unwrap();
        let sessions = Sessions::new(db, Duration::hours(1));

        let token = sessions.start(&user).await.unwrap();
        assert_eq!(sessions.resolve(&token).await.unwrap(), Some(user));

        sessions.end(&token).await.unwrap();
        assert_eq!(sessions.resolve(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn zero_ttl_sessions_are_purged() {
        let db = Database::open_in_memory().unwrap();
        let user = db
            .call(|conn| users::create_user(conn, &UserName::parse("wes").unwrap(), "", "h"))
            .await
            .unwrap();
        let sessions = Sessions::new(db, Duration::zero());

        let token = sessions.start(&user).await.unwrap();
        assert_eq!(sessions.resolve(&token).await.unwrap(), None);
        assert_eq!(sessions.purge_expired().await.unwrap(), 1);
    }
}
