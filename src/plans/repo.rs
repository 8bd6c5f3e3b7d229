use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::athletes::Athlete;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: i64,
    pub meal_plan_id: i64,
    pub food_id: String,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl MealPlan {
    pub async fn create(db: &PgPool, name: &str) -> sqlx::Result<MealPlan> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            INSERT INTO meal_plans (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM meal_plans
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &PgPool, id: i64) -> sqlx::Result<Option<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM meal_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Items cascade at the store level via the plan foreign key.
    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn items(db: &PgPool, plan_id: i64) -> sqlx::Result<Vec<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, meal_plan_id, food_id, food_name, quantity, unit, meal_type,
                   created_at, updated_at
            FROM food_items
            WHERE meal_plan_id = $1
            ORDER BY id
            "#,
        )
        .bind(plan_id)
        .fetch_all(db)
        .await
    }

    pub async fn athletes(db: &PgPool, plan_id: i64) -> sqlx::Result<Vec<Athlete>> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT a.id, a.name, a.email, a.height, a.weight, a.created_at, a.updated_at
            FROM athletes a
            JOIN athlete_meal_plans amp ON amp.athlete_id = a.id
            WHERE amp.meal_plan_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(plan_id)
        .fetch_all(db)
        .await
    }

    /// Associate a plan with an athlete. Re-associating an existing pair is
    /// a no-op, not an error.
    pub async fn attach_athlete(db: &PgPool, athlete_id: i64, plan_id: i64) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO athlete_meal_plans (athlete_id, meal_plan_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(athlete_id)
        .bind(plan_id)
        .execute(db)
        .await?;
        Ok(())
    }
}

impl FoodItem {
    pub async fn create(
        db: &PgPool,
        plan_id: i64,
        food_id: &str,
        food_name: &str,
        quantity: f64,
        unit: &str,
        meal_type: &str,
    ) -> sqlx::Result<FoodItem> {
        sqlx::query_as::<_, FoodItem>(
            r#"
            INSERT INTO food_items (meal_plan_id, food_id, food_name, quantity, unit, meal_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, meal_plan_id, food_id, food_name, quantity, unit, meal_type,
                      created_at, updated_at
            "#,
        )
        .bind(plan_id)
        .bind(food_id)
        .bind(food_name)
        .bind(quantity)
        .bind(unit)
        .bind(meal_type)
        .fetch_one(db)
        .await
    }

    /// Partial update: a NULL bind keeps the stored value.
    pub async fn update(
        db: &PgPool,
        id: i64,
        quantity: Option<f64>,
        unit: Option<&str>,
        meal_type: Option<&str>,
    ) -> sqlx::Result<Option<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            r#"
            UPDATE food_items
            SET quantity = COALESCE($2, quantity),
                unit = COALESCE($3, unit),
                meal_type = COALESCE($4, meal_type),
                updated_at = now()
            WHERE id = $1
            RETURNING id, meal_plan_id, food_id, food_name, quantity, unit, meal_type,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(unit)
        .bind(meal_type)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
