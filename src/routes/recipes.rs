use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::recipes::RecipePayload,
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::{Recipe, RecipeSummary},
    response::ApiResponse,
    services::{cart_service, favorite_service, recipe_service, shopping_list},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/download_shopping_cart", get(download_shopping_cart))
        .route(
            "/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route("/{id}/favorite", get(add_favorite).delete(remove_favorite))
        .route(
            "/{id}/shopping_cart",
            get(add_to_cart).delete(remove_from_cart),
        )
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    responses(
        (status = 200, description = "List recipes, newest first", body = ApiResponse<Vec<Recipe>>)
    ),
    tag = "Recipes"
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> AppResult<Json<ApiResponse<Vec<Recipe>>>> {
    let resp = recipe_service::list_recipes(&state, user.as_ref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Get recipe", body = ApiResponse<Recipe>),
        (status = 404, description = "Recipe not found")
    ),
    tag = "Recipes"
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Recipe>>> {
    let resp = recipe_service::get_recipe(&state, user.as_ref(), id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Create recipe", body = ApiResponse<Recipe>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<RecipePayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Recipe>>)> {
    let resp = recipe_service::create_recipe(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipePayload,
    responses(
        (status = 200, description = "Updated recipe", body = ApiResponse<Recipe>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<RecipePayload>,
) -> AppResult<Json<ApiResponse<Recipe>>> {
    let resp = recipe_service::update_recipe(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Deleted recipe"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Recipes"
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    recipe_service::delete_recipe(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/favorite",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Added to favorites", body = ApiResponse<RecipeSummary>),
        (status = 400, description = "Already in favorites"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ApiResponse<RecipeSummary>>)> {
    let resp = favorite_service::add_favorite(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    favorite_service::remove_favorite(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/shopping_cart",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Added to shopping cart", body = ApiResponse<RecipeSummary>),
        (status = 400, description = "Already in shopping cart"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shopping cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ApiResponse<RecipeSummary>>)> {
    let resp = cart_service::add_to_cart(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Removed from shopping cart"),
        (status = 404, description = "Cart entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shopping cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    cart_service::remove_from_cart(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    responses(
        (status = 200, description = "Aggregated shopping list", body = String, content_type = "text/plain"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Shopping cart"
)]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let body = cart_service::download_shopping_list(&state, &user).await?;
    let disposition = format!("attachment; filename=\"{}\"", shopping_list::FILE_NAME);
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, body))
}
