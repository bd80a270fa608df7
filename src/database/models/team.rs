use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: Option<String>,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}

impl TeamMember {
    /// Roster in display order. Non-admin readers only see active members.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let sql = if include_inactive {
            "SELECT * FROM team_members ORDER BY sort_order, created_at"
        } else {
            "SELECT * FROM team_members WHERE active ORDER BY sort_order, created_at"
        };
        sqlx::query_as::<_, TeamMember>(sql).fetch_all(pool).await
    }

    pub async fn insert(pool: &PgPool, new: &NewTeamMember) -> Result<TeamMember, sqlx::Error> {
        sqlx::query_as::<_, TeamMember>(
            "INSERT INTO team_members (name, role, image, bio, sort_order, active) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.role)
        .bind(&new.image)
        .bind(&new.bio)
        .bind(new.sort_order)
        .bind(new.active)
        .fetch_one(pool)
        .await
    }

    /// Returns None when no row matched the id.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &TeamMemberPatch,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        sqlx::query_as::<_, TeamMember>(
            "UPDATE team_members SET \
               name = COALESCE($2, name), \
               role = COALESCE($3, role), \
               image = COALESCE($4, image), \
               bio = COALESCE($5, bio), \
               sort_order = COALESCE($6, sort_order), \
               active = COALESCE($7, active), \
               updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.role)
        .bind(&patch.image)
        .bind(&patch.bio)
        .bind(patch.sort_order)
        .bind(patch.active)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
