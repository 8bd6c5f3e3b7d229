use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogEntry {
    pub id: i64,
    pub athlete_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    pub meal_type: String,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub kcal: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub lipids: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl DailyLogEntry {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        athlete_id: i64,
        eaten_at: OffsetDateTime,
        meal_type: &str,
        food_name: &str,
        quantity: f64,
        unit: &str,
        kcal: f64,
        protein: f64,
        carbohydrates: f64,
        lipids: f64,
    ) -> sqlx::Result<DailyLogEntry> {
        sqlx::query_as::<_, DailyLogEntry>(
            r#"
            INSERT INTO daily_log_entries
                (athlete_id, eaten_at, meal_type, food_name, quantity, unit,
                 kcal, protein, carbohydrates, lipids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, athlete_id, eaten_at, meal_type, food_name, quantity, unit,
                      kcal, protein, carbohydrates, lipids, created_at, updated_at
            "#,
        )
        .bind(athlete_id)
        .bind(eaten_at)
        .bind(meal_type)
        .bind(food_name)
        .bind(quantity)
        .bind(unit)
        .bind(kcal)
        .bind(protein)
        .bind(carbohydrates)
        .bind(lipids)
        .fetch_one(db)
        .await
    }

    /// Entries for one athlete with `eaten_at` in `[start, end)`, ascending.
    pub async fn list_between(
        db: &PgPool,
        athlete_id: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> sqlx::Result<Vec<DailyLogEntry>> {
        sqlx::query_as::<_, DailyLogEntry>(
            r#"
            SELECT id, athlete_id, eaten_at, meal_type, food_name, quantity, unit,
                   kcal, protein, carbohydrates, lipids, created_at, updated_at
            FROM daily_log_entries
            WHERE athlete_id = $1 AND eaten_at >= $2 AND eaten_at < $3
            ORDER BY eaten_at ASC
            "#,
        )
        .bind(athlete_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
    }

    /// Partial update: a NULL bind keeps the stored value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        db: &PgPool,
        id: i64,
        eaten_at: Option<OffsetDateTime>,
        meal_type: Option<&str>,
        food_name: Option<&str>,
        quantity: Option<f64>,
        unit: Option<&str>,
        kcal: Option<f64>,
        protein: Option<f64>,
        carbohydrates: Option<f64>,
        lipids: Option<f64>,
    ) -> sqlx::Result<Option<DailyLogEntry>> {
        sqlx::query_as::<_, DailyLogEntry>(
            r#"
            UPDATE daily_log_entries
            SET eaten_at = COALESCE($2, eaten_at),
                meal_type = COALESCE($3, meal_type),
                food_name = COALESCE($4, food_name),
                quantity = COALESCE($5, quantity),
                unit = COALESCE($6, unit),
                kcal = COALESCE($7, kcal),
                protein = COALESCE($8, protein),
                carbohydrates = COALESCE($9, carbohydrates),
                lipids = COALESCE($10, lipids),
                updated_at = now()
            WHERE id = $1
            RETURNING id, athlete_id, eaten_at, meal_type, food_name, quantity, unit,
                      kcal, protein, carbohydrates, lipids, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(eaten_at)
        .bind(meal_type)
        .bind(food_name)
        .bind(quantity)
        .bind(unit)
        .bind(kcal)
        .bind(protein)
        .bind(carbohydrates)
        .bind(lipids)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM daily_log_entries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
