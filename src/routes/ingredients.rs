use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::ingredients::IngredientQuery,
    error::AppResult,
    models::Ingredient,
    response::ApiResponse,
    services::ingredient_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients))
        .route("/{id}", get(get_ingredient))
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    params(IngredientQuery),
    responses(
        (status = 200, description = "List ingredients", body = ApiResponse<Vec<Ingredient>>)
    ),
    tag = "Ingredients"
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientQuery>,
) -> AppResult<Json<ApiResponse<Vec<Ingredient>>>> {
    let resp = ingredient_service::list_ingredients(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Get ingredient", body = ApiResponse<Ingredient>),
        (status = 404, description = "Ingredient not found")
    ),
    tag = "Ingredients"
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    let resp = ingredient_service::get_ingredient(&state, id).await?;
    Ok(Json(resp))
}
