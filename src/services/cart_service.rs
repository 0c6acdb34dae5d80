use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::{
        Recipes, ShoppingCart,
        shopping_cart::{self, Column as CartCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::RecipeSummary,
    response::{ApiResponse, Meta},
    services::{shopping_list, user_service::ensure_registered},
    state::AppState,
};

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    recipe_id: Uuid,
) -> AppResult<ApiResponse<RecipeSummary>> {
    let recipe = Recipes::find_by_id(recipe_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_registered(&state.orm, user).await?;

    let exist = ShoppingCart::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .filter(CartCol::RecipeId.eq(recipe_id))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Recipe is already in the shopping cart".into()));
    }

    shopping_cart::ActiveModel {
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
        "cart_add",
        "shopping_cart",
        serde_json::json!({ "recipe_id": recipe_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to shopping cart",
        RecipeSummary::from(recipe),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(state: &AppState, user: &AuthUser, recipe_id: Uuid) -> AppResult<()> {
    let result = ShoppingCart::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .filter(CartCol::RecipeId.eq(recipe_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "cart_remove",
        "shopping_cart",
        serde_json::json!({ "recipe_id": recipe_id }),
    )
    .await;

    Ok(())
}

/// Plain-text shopping list for everything in the user's cart.
pub async fn download_shopping_list(state: &AppState, user: &AuthUser) -> AppResult<String> {
    shopping_list::build(&state.pool, user.user_id).await
}
