/// Database implementation
use calorie_core::{
    CalorieError, DailyLog, NewUser, Result, UpdateUser, User, UserId, UserStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

/// SQLite credential store with embedded food logs
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| CalorieError::storage(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| CalorieError::storage(e.to_string()))?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool (for testing)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability across execution contexts
        const MIGRATIONS: &[&str] = &[include_str!("../migrations/0001_create_users.sql")];

        for migration in MIGRATIONS {
            sqlx::query(migration)
                .execute(pool)
                .await
                .map_err(|e| CalorieError::storage(format!("migration failed: {e}")))?;
        }

        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let food_log: Vec<DailyLog> = serde_json::from_str(&row.get::<String, _>("food_log"))?;

    Ok(User::with_id(
        UserId::new(row.get::<String, _>("id")),
        row.get::<String, _>("username"),
        row.get::<String, _>("password_hash"),
        row.get::<String, _>("email"),
        chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| CalorieError::storage("invalid timestamp"))?,
        food_log,
    ))
}

const USER_COLUMNS: &str = "id, username, password_hash, email, food_log, created_at";

impl UserStore for Database {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let user = User::new(new_user);
        let food_log = serde_json::to_string(&user.food_log)?;

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, email, food_log, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.as_str())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&food_log)
        .bind(user.created_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CalorieError::DuplicateUsername(user.username.clone())
            }
            _ => CalorieError::storage(e.to_string()),
        })?;

        Ok(user)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CalorieError::storage(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CalorieError::storage(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CalorieError::storage(e.to_string()))?;

        rows.iter().map(user_from_row).collect()
    }

    async fn update_user(&self, username: &str, update: UpdateUser) -> Result<Option<User>> {
        if let Some(email) = update.email {
            sqlx::query("UPDATE users SET email = ? WHERE username = ?")
                .bind(&email)
                .bind(username)
                .execute(&self.pool)
                .await
                .map_err(|e| CalorieError::storage(e.to_string()))?;
        }

        self.find_user(username).await
    }

    async fn delete_user(&self, username: &str) -> Result<Option<User>> {
        let Some(user) = self.find_user(username).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| CalorieError::storage(e.to_string()))?;

        Ok(Some(user))
    }

    async fn save_food_log(&self, user: &User) -> Result<()> {
        let food_log = serde_json::to_string(&user.food_log)?;

        let result = sqlx::query("UPDATE users SET food_log = ? WHERE id = ?")
            .bind(&food_log)
            .bind(user.id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| CalorieError::storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CalorieError::UserNotFound(user.username.clone()));
        }

        Ok(())
    }
}
