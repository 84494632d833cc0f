//! SQL role-directory adapter.
//!
//! Read-only lookups against the business access table. Each login does a
//! fresh query; nothing here is cached or mutated.

use async_trait::async_trait;
use paineis_access::{DirectoryError, Role, RoleDirectory, RoleRecord};
use sqlx::{FromRow, PgPool};

/// Row type for directory lookups.
#[derive(FromRow)]
struct AccessRow {
    nome: String,
    cargo: String,
    e_mail: String,
}

/// Role directory backed by the `acessos_dbf` table.
pub struct SqlRoleDirectory {
    pool: PgPool,
}

impl SqlRoleDirectory {
    /// Creates a new directory adapter over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for SqlRoleDirectory {
    async fn lookup_role(&self, email: &str) -> Result<Option<RoleRecord>, DirectoryError> {
        let row: Option<AccessRow> = sqlx::query_as(
            r#"
            SELECT nome, cargo, e_mail
            FROM acessos_dbf
            WHERE e_mail = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Query(e.to_string()))?;

        Ok(row.map(|r| RoleRecord {
            email: r.e_mail,
            display_name: r.nome,
            role: Role::new(r.cargo),
        }))
    }
}
