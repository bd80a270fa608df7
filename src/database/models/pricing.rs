use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PricingPlan {
    pub id: Uuid,
    pub title: String,
    /// Display price; accepted as JSON text or number and stored as text.
    pub price: String,
    pub features: Json<Vec<String>>,
    pub popular: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPricingPlan {
    pub title: String,
    pub price: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "active".to_string()
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingPlanPatch {
    pub title: Option<String>,
    pub price: Option<String>,
    pub features: Option<Vec<String>>,
    pub popular: Option<bool>,
    pub status: Option<String>,
}

impl PricingPlan {
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let sql = if include_inactive {
            "SELECT * FROM pricing_plans ORDER BY created_at"
        } else {
            "SELECT * FROM pricing_plans WHERE status = 'active' ORDER BY created_at"
        };
        sqlx::query_as::<_, PricingPlan>(sql).fetch_all(pool).await
    }

    pub async fn insert(pool: &PgPool, new: &NewPricingPlan) -> Result<PricingPlan, sqlx::Error> {
        sqlx::query_as::<_, PricingPlan>(
            "INSERT INTO pricing_plans (title, price, features, popular, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new.title)
        .bind(&new.price)
        .bind(Json(&new.features))
        .bind(new.popular)
        .bind(&new.status)
        .fetch_one(pool)
        .await
    }

    /// Returns None when no row matched the id.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &PricingPlanPatch,
    ) -> Result<Option<PricingPlan>, sqlx::Error> {
        sqlx::query_as::<_, PricingPlan>(
            "UPDATE pricing_plans SET \
               title = COALESCE($2, title), \
               price = COALESCE($3, price), \
               features = COALESCE($4, features), \
               popular = COALESCE($5, popular), \
               status = COALESCE($6, status), \
               updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.price)
        .bind(patch.features.as_ref().map(Json))
        .bind(patch.popular)
        .bind(&patch.status)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pricing_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
