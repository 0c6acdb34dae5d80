use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::{
        Favorites, Recipes,
        favorites::{self, Column as FavoriteCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::RecipeSummary,
    response::{ApiResponse, Meta},
    services::user_service::ensure_registered,
    state::AppState,
};

pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    recipe_id: Uuid,
) -> AppResult<ApiResponse<RecipeSummary>> {
    let recipe = Recipes::find_by_id(recipe_id).one(&state.orm).await?;
    let recipe = match recipe {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    ensure_registered(&state.orm, user).await?;

    let existing = Favorites::find()
        .filter(FavoriteCol::UserId.eq(user.user_id))
        .filter(FavoriteCol::RecipeId.eq(recipe_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest("Recipe is already in favorites".into()));
    }

    favorites::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        recipe_id: Set(recipe_id),
        added_date: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "favorite_add",
        "favorites",
        serde_json::json!({ "recipe_id": recipe_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to favorites",
        RecipeSummary::from(recipe),
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(state: &AppState, user: &AuthUser, recipe_id: Uuid) -> AppResult<()> {
    let result = Favorites::delete_many()
        .filter(FavoriteCol::UserId.eq(user.user_id))
        .filter(FavoriteCol::RecipeId.eq(recipe_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "favorite_remove",
        "favorites",
        serde_json::json!({ "recipe_id": recipe_id }),
    )
    .await;

    Ok(())
}
