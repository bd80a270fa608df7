use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Free-form page section keyed by name (about, footer, contact, ...). The
/// section row is an upsert target: writes merge into whatever is already
/// stored rather than replacing it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CmsSection {
    pub id: Uuid,
    pub section: String,
    pub fields: Value,
    pub updated_at: DateTime<Utc>,
}

impl CmsSection {
    /// Section body by key. A section that was never written reads as an empty
    /// object, not an error.
    pub async fn fetch_fields(pool: &PgPool, section: &str) -> Result<Value, sqlx::Error> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT fields FROM cms_sections WHERE section = $1")
                .bind(section)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(fields,)| fields).unwrap_or_else(|| Value::Object(Default::default())))
    }

    /// Create-or-merge by section key. Supplied fields overwrite stored ones;
    /// fields not supplied are left untouched.
    pub async fn upsert(pool: &PgPool, section: &str, fields: &Value) -> Result<CmsSection, sqlx::Error> {
        sqlx::query_as::<_, CmsSection>(
            "INSERT INTO cms_sections (section, fields) VALUES ($1, $2) \
             ON CONFLICT (section) DO UPDATE \
               SET fields = cms_sections.fields || EXCLUDED.fields, updated_at = now() \
             RETURNING *",
        )
        .bind(section)
        .bind(fields)
        .fetch_one(pool)
        .await
    }
}
