use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct RecipeReport {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
    pub favorites_count: i64,
}

/// One favorite or shopping-cart row, joined with names for inspection.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct MarkerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub recipe_id: Uuid,
    pub recipe_title: String,
    pub added_date: DateTime<Utc>,
}
