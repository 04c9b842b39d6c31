//! Session collection over the `sessions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use mutiny_core::result::AppResult;
use mutiny_core::traits::{Collection, Document};
use mutiny_entity::{Session, SessionData, SessionFilter, SessionId, SessionPatch};

use super::map_sqlx_error;

#[derive(Debug, FromRow)]
struct SessionRow {
    id: Uuid,
    refreshed_at: DateTime<Utc>,
    data: Json<SessionData>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: SessionId::from_uuid(row.id),
            refreshed_at: row.refreshed_at,
            data: row.data.0,
        }
    }
}

/// Append the `WHERE` clause for a session filter.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &SessionFilter) {
    match filter {
        SessionFilter::Id(id) => {
            qb.push(" WHERE id = ").push_bind(id.as_uuid());
        }
        SessionFilter::FreshSince { id, cutoff } => {
            qb.push(" WHERE id = ")
                .push_bind(id.as_uuid())
                .push(" AND refreshed_at > ")
                .push_bind(*cutoff);
        }
        SessionFilter::StaleAsOf(cutoff) => {
            qb.push(" WHERE refreshed_at <= ").push_bind(*cutoff);
        }
        SessionFilter::All => {}
    }
}

/// Session collection backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgSessionCollection {
    pool: PgPool,
}

impl PgSessionCollection {
    /// Create a new session collection.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Collection<Session> for PgSessionCollection {
    async fn insert(&self, record: &Session) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (id, refreshed_at, data) VALUES ($1, $2, $3)")
            .bind(record.id.as_uuid())
            .bind(record.refreshed_at)
            .bind(Json(&record.data))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert session", e))?;
        Ok(())
    }

    async fn find_one(&self, filter: &SessionFilter) -> AppResult<Option<Session>> {
        let mut qb = QueryBuilder::new("SELECT id, refreshed_at, data FROM sessions");
        push_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<SessionRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find session", e))?;

        Ok(row.map(Session::from))
    }

    async fn delete_many(&self, filter: &SessionFilter) -> AppResult<u64> {
        let mut qb = QueryBuilder::new("DELETE FROM sessions");
        push_filter(&mut qb, filter);

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete sessions", e))?;

        Ok(result.rows_affected())
    }

    async fn update_one(&self, filter: &SessionFilter, patch: &SessionPatch) -> AppResult<bool> {
        let mut qb = QueryBuilder::new("UPDATE sessions SET ");
        match patch {
            SessionPatch::Touch(at) => {
                qb.push("refreshed_at = ").push_bind(*at);
            }
        }

        // Key-pinned filters go straight into the UPDATE so the row lock
        // re-checks the timestamp condition.
        if Session::pinned_key(filter).is_some() {
            push_filter(&mut qb, filter);
        } else {
            qb.push(" WHERE id IN (SELECT id FROM sessions");
            push_filter(&mut qb, filter);
            qb.push(" LIMIT 1)");
        }

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count sessions", e))?;
        Ok(count as u64)
    }
}
