use crate::auth::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, profile_picture, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. The UNIQUE constraint on email
    /// is what rejects a concurrent duplicate; callers map that violation to
    /// a conflict via [`is_unique_violation`].
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
        profile_picture: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, password_hash, profile_picture)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, password_hash, profile_picture, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(profile_picture)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}

/// True when the error is a Postgres unique-constraint violation (23505).
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| match e {
            sqlx::Error::Database(db) => db.code(),
            _ => None,
        })
        .map(|code| code == "23505")
        .unwrap_or(false)
}
