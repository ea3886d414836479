use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// `$start, $start+1, ...` for an `IN (...)` list of `count` values
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("duplicate key") || msg.contains("unique constraint")
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let sql = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email";
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [input.name.clone().into(), input.email.clone().into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    UserError::DuplicateEmail(input.email.clone())
                } else {
                    UserError::Internal(format!("Database error: {}", e))
                }
            })?
            .ok_or_else(|| UserError::Internal("Failed to create user".to_string()))?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id, name, email FROM users WHERE id = $1",
            [id.into()],
        );

        let row = UserRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, email FROM users WHERE id IN ({}) ORDER BY id",
            placeholders(1, ids.len())
        );
        let values: Vec<Value> = ids.iter().map(|id| (*id).into()).collect();
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);

        let rows = UserRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list(&self, ids: &[i64], offset: u64, limit: u64) -> UserResult<Vec<User>> {
        let mut values: Vec<Value> = ids.iter().map(|id| (*id).into()).collect();

        let filter = if ids.is_empty() {
            String::new()
        } else {
            format!("WHERE id IN ({})", placeholders(1, ids.len()))
        };
        let sql = format!(
            "SELECT id, name, email FROM users {} ORDER BY id LIMIT ${} OFFSET ${}",
            filter,
            ids.len() + 1,
            ids.len() + 2
        );
        values.push((limit as i64).into());
        values.push((offset as i64).into());

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
        let rows = UserRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id, name, email FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1",
            [email.into()],
        );

        let row = UserRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1, 3), "$1, $2, $3");
        assert_eq!(placeholders(4, 1), "$4");
        assert_eq!(placeholders(1, 0), "");
    }
}
