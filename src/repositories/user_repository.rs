//! Repository para usuarios y perfiles en PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{Account, NewAccount, User, UserRole};
use crate::repositories::UserRepository;
use crate::utils::errors::{conflict_error, is_unique_violation, AppError, AppResult};

pub struct UserRepositoryPg {
    pool: PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPg {
    async fn create_account(&self, account: NewAccount) -> AppResult<Account> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, first_name, last_name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.role)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict_error("User", "username", &account.username)
            } else {
                AppError::Database(e)
            }
        })?;

        let profile_id = match account.role {
            UserRole::Admin => None,
            UserRole::Driver => {
                let id = Uuid::new_v4();
                sqlx::query(
                    "INSERT INTO drivers (id, user_id, address, phone) VALUES ($1, $2, $3, $4)",
                )
                .bind(id)
                .bind(user.id)
                .bind(account.address.clone().unwrap_or_default())
                .bind(&account.phone)
                .execute(&mut *tx)
                .await?;
                Some(id)
            }
            UserRole::Client => {
                let id = Uuid::new_v4();
                sqlx::query(
                    "INSERT INTO clients (id, user_id, phone, address) VALUES ($1, $2, $3, $4)",
                )
                .bind(id)
                .bind(user.id)
                .bind(&account.phone)
                .bind(&account.address)
                .execute(&mut *tx)
                .await?;
                Some(id)
            }
        };

        tx.commit().await?;
        Ok(Account { user, profile_id })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    async fn profile_id(&self, user: &User) -> AppResult<Option<Uuid>> {
        let query = match user.role {
            UserRole::Admin => return Ok(None),
            UserRole::Driver => "SELECT id FROM drivers WHERE user_id = $1",
            UserRole::Client => "SELECT id FROM clients WHERE user_id = $1",
        };
        let row: Option<(Uuid,)> = sqlx::query_as(query)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }
}
