use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::admin::{MarkerEntry, RecipeReport},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipe_report))
        .route("/favorites", get(list_favorites))
        .route("/shopping_cart", get(list_shopping_cart))
}

#[utoipa::path(
    get,
    path = "/api/admin/recipes",
    responses(
        (status = 200, description = "Recipes with favorite counts (admin only)", body = ApiResponse<Vec<RecipeReport>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recipe_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<RecipeReport>>>> {
    let resp = admin_service::recipe_report(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/favorites",
    responses(
        (status = 200, description = "All favorites (admin only)", body = ApiResponse<Vec<MarkerEntry>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<MarkerEntry>>>> {
    let resp = admin_service::list_favorites(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/shopping_cart",
    responses(
        (status = 200, description = "All shopping cart entries (admin only)", body = ApiResponse<Vec<MarkerEntry>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_shopping_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<MarkerEntry>>>> {
    let resp = admin_service::list_shopping_cart(&state, &user).await?;
    Ok(Json(resp))
}
