//! Role-record storage.

use adminctl_core::{AdminError, AdminResult, NewRoleRecord, RoleRecord, RoleStore};
use async_trait::async_trait;
use sqlx_core::query_as::query_as;
use sqlx_postgres::Postgres;
use tracing::instrument;
use uuid::Uuid;

use crate::PgPool;

/// Role-record store backed by the `super_admins` table.
#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    /// Create a store with an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store by connecting to the database.
    ///
    /// # Errors
    ///
    /// Returns a store error if the connection fails.
    pub async fn connect(database_url: &str) -> AdminResult<Self> {
        use sqlx_core::pool::PoolOptions;
        let pool = PoolOptions::<Postgres>::new()
            .connect(database_url)
            .await
            .map_err(|e| AdminError::store(format!("failed to connect: {e}")))?;
        Ok(Self::new(pool))
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn record_from_tuple(row: (Uuid, Uuid, String, String)) -> RoleRecord {
    RoleRecord {
        id: row.0,
        identity_id: row.1,
        name: row.2,
        email: row.3,
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    #[instrument(skip(self))]
    async fn find_by_identity(&self, identity_id: Uuid) -> AdminResult<Option<RoleRecord>> {
        // fetch_optional keeps the "no rows" branch structural; only a
        // genuine query failure becomes an error.
        let row: Option<(Uuid, Uuid, String, String)> = query_as(
            r#"
            SELECT id, auth_user_id, name, email
            FROM super_admins
            WHERE auth_user_id = $1
            "#,
        )
        .bind(identity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AdminError::store(e.to_string()))?;

        Ok(row.map(record_from_tuple))
    }

    #[instrument(skip(self, record))]
    async fn insert(&self, record: NewRoleRecord) -> AdminResult<RoleRecord> {
        let id = Uuid::new_v4();
        let row: (Uuid, Uuid, String, String) = query_as(
            r#"
            INSERT INTO super_admins (id, auth_user_id, name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, auth_user_id, name, email
            "#,
        )
        .bind(id)
        .bind(record.identity_id)
        .bind(&record.name)
        .bind(&record.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx_core::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return AdminError::conflict(format!(
                    "role record for identity '{}' already exists",
                    record.identity_id
                ));
            }
            AdminError::store(e.to_string())
        })?;

        Ok(record_from_tuple(row))
    }
}
