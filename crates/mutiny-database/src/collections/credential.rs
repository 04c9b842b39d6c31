//! Credential collection over the `credentials` table.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use mutiny_core::result::AppResult;
use mutiny_core::traits::{Collection, Document};
use mutiny_entity::{AclSet, Credential, CredentialFilter, CredentialPatch};

use super::map_sqlx_error;

#[derive(Debug, FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    acl: Vec<String>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Self {
            username: row.username,
            password_hash: row.password_hash,
            acl: row.acl.into_iter().collect::<AclSet>(),
        }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CredentialFilter) {
    match filter {
        CredentialFilter::Username(name) => {
            qb.push(" WHERE username = ").push_bind(name.clone());
        }
        CredentialFilter::All => {}
    }
}

/// Credential collection backed by PostgreSQL.
///
/// The `username` primary key is the uniqueness constraint that settles
/// concurrent registrations; a violation surfaces as a conflict error.
#[derive(Debug, Clone)]
pub struct PgCredentialCollection {
    pool: PgPool,
}

impl PgCredentialCollection {
    /// Create a new credential collection.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Collection<Credential> for PgCredentialCollection {
    async fn insert(&self, record: &Credential) -> AppResult<()> {
        sqlx::query("INSERT INTO credentials (username, password_hash, acl) VALUES ($1, $2, $3)")
            .bind(&record.username)
            .bind(&record.password_hash)
            .bind(record.acl.to_vec())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert credential", e))?;
        Ok(())
    }

    async fn find_one(&self, filter: &CredentialFilter) -> AppResult<Option<Credential>> {
        let mut qb =
            QueryBuilder::new("SELECT username, password_hash, acl FROM credentials");
        push_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<CredentialRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find credential", e))?;

        Ok(row.map(Credential::from))
    }

    async fn delete_many(&self, filter: &CredentialFilter) -> AppResult<u64> {
        let mut qb = QueryBuilder::new("DELETE FROM credentials");
        push_filter(&mut qb, filter);

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete credentials", e))?;

        Ok(result.rows_affected())
    }

    async fn update_one(
        &self,
        filter: &CredentialFilter,
        patch: &CredentialPatch,
    ) -> AppResult<bool> {
        let mut qb = QueryBuilder::new("UPDATE credentials SET ");
        match patch {
            CredentialPatch::Acl(acl) => {
                qb.push("acl = ").push_bind(acl.to_vec());
            }
        }

        if Credential::pinned_key(filter).is_some() {
            push_filter(&mut qb, filter);
        } else {
            qb.push(" WHERE username IN (SELECT username FROM credentials");
            push_filter(&mut qb, filter);
            qb.push(" LIMIT 1)");
        }

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update credential", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credentials")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count credentials", e))?;
        Ok(count as u64)
    }
}
