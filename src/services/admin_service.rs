use crate::{
    db::DbPool,
    dto::admin::{MarkerEntry, RecipeReport},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    state::AppState,
};

pub async fn recipe_report(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<RecipeReport>>> {
    ensure_admin(user)?;
    let items = sqlx::query_as::<_, RecipeReport>(
        r#"
        SELECT r.id, r.title, u.username AS author, r.pub_date,
               COUNT(f.id) AS favorites_count
        FROM recipes r
        JOIN users u ON u.id = r.author_id
        LEFT JOIN favorites f ON f.recipe_id = r.id
        GROUP BY r.id, u.username
        ORDER BY r.pub_date DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::list("Recipes", items))
}

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<MarkerEntry>>> {
    ensure_admin(user)?;
    let items = list_markers(&state.pool, MarkerTable::Favorites).await?;
    Ok(ApiResponse::list("Favorites", items))
}

pub async fn list_shopping_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<MarkerEntry>>> {
    ensure_admin(user)?;
    let items = list_markers(&state.pool, MarkerTable::ShoppingCart).await?;
    Ok(ApiResponse::list("Shopping cart", items))
}

#[derive(Debug, Clone, Copy)]
enum MarkerTable {
    Favorites,
    ShoppingCart,
}

impl MarkerTable {
    fn as_sql(&self) -> &'static str {
        match self {
            MarkerTable::Favorites => "favorites",
            MarkerTable::ShoppingCart => "shopping_cart",
        }
    }
}

async fn list_markers(pool: &DbPool, table: MarkerTable) -> AppResult<Vec<MarkerEntry>> {
    let sql = format!(
        r#"
        SELECT m.id, m.user_id, u.username, m.recipe_id, r.title AS recipe_title, m.added_date
        FROM {} m
        JOIN users u ON u.id = m.user_id
        JOIN recipes r ON r.id = m.recipe_id
        ORDER BY m.added_date DESC
        "#,
        table.as_sql()
    );
    let items = sqlx::query_as::<_, MarkerEntry>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(items)
}
