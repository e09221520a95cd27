//! PostgreSQL implementation of the role-record store.
//!
//! One table backs the privileged-role assignment:
//!
//! ```sql
//! CREATE TABLE super_admins (
//!     id           uuid PRIMARY KEY,
//!     auth_user_id uuid NOT NULL UNIQUE,
//!     name         text NOT NULL,
//!     email        text NOT NULL,
//!     created_at   timestamptz NOT NULL DEFAULT now()
//! );
//! ```
//!
//! The `auth_user_id` unique constraint is the last line of defense against
//! concurrent invocations inserting two records for one identity; a
//! violation surfaces as [`AdminError::Conflict`](adminctl_core::AdminError)
//! and is never retried.

mod role_record;

pub use role_record::PgRoleStore;

use sqlx_core::pool::Pool;
use sqlx_postgres::Postgres;

/// PostgreSQL connection pool type alias.
pub type PgPool = Pool<Postgres>;
