use sqlx::MySqlPool;

use roam_core::user::User;

use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct UserRepo {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: u64,
    name: String,
    email: String,
    number: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            number: row.number,
        }
    }
}

const USER_COLUMNS: &str = "id, name, email, number";

impl UserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Registration rejects duplicate emails with a conflict; the unique
    /// index backstops the race between the check and the insert.
    pub async fn register(&self, name: &str, email: &str, number: &str) -> StoreResult<User> {
        let existing: Option<u64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let result = sqlx::query("INSERT INTO users (name, email, number) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from_write(err, "User with this email already exists"))?;

        self.get(result.last_insert_id())
            .await?
            .ok_or(StoreError::NotFound("user"))
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn get(&self, id: u64) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn list(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Admin insert; duplicates surface as conflicts via the unique index.
    pub async fn create(&self, name: &str, email: &str, number: &str) -> StoreResult<u64> {
        let result = sqlx::query("INSERT INTO users (name, email, number) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from_write(err, "User with this email already exists"))?;
        Ok(result.last_insert_id())
    }

    pub async fn update(&self, id: u64, name: &str, email: &str, number: &str) -> StoreResult<()> {
        sqlx::query("UPDATE users SET name = ?, email = ?, number = ? WHERE id = ?")
            .bind(name)
            .bind(email)
            .bind(number)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from_write(err, "User with this email already exists"))?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
