use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Athlete {
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        height: Option<f64>,
        weight: Option<f64>,
    ) -> sqlx::Result<Athlete> {
        sqlx::query_as::<_, Athlete>(
            r#"
            INSERT INTO athletes (name, email, height, weight)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, height, weight, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(height)
        .bind(weight)
        .fetch_one(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Athlete>> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, name, email, height, weight, created_at, updated_at
            FROM athletes
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &PgPool, id: i64) -> sqlx::Result<Option<Athlete>> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, name, email, height, weight, created_at, updated_at
            FROM athletes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Partial update: a NULL bind keeps the stored value.
    pub async fn update(
        db: &PgPool,
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
        height: Option<f64>,
        weight: Option<f64>,
    ) -> sqlx::Result<Option<Athlete>> {
        sqlx::query_as::<_, Athlete>(
            r#"
            UPDATE athletes
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                height = COALESCE($4, height),
                weight = COALESCE($5, weight),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, height, weight, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(height)
        .bind(weight)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
