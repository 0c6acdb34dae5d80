use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::recipes::RecipePayload,
    entity::{
        Favorites, Ingredients, RecipeIngredients, RecipeTags, Recipes, ShoppingCart, Tags, Users,
        favorites::Column as FavoriteCol,
        ingredients::Column as IngredientCol,
        recipe_ingredients::{self, Column as RecipeIngredientCol},
        recipe_tags::{self, Column as RecipeTagCol},
        recipes::{self, Column as RecipeCol, Model as RecipeModel},
        shopping_cart::Column as CartCol,
        tags::Column as TagCol,
        users::{self, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_or_admin},
    models::{Recipe, RecipeIngredient, Tag, UserProfile},
    response::{ApiResponse, Meta},
    services::{follow_service, user_service::ensure_registered},
    state::AppState,
};

pub async fn list_recipes(
    state: &AppState,
    viewer: Option<&AuthUser>,
) -> AppResult<ApiResponse<Vec<Recipe>>> {
    let models = Recipes::find()
        .order_by_desc(RecipeCol::PubDate)
        .all(&state.orm)
        .await?;

    let items = load_views(&state.orm, models, viewer.map(|u| u.user_id)).await?;
    Ok(ApiResponse::list("Recipes", items))
}

pub async fn get_recipe(
    state: &AppState,
    viewer: Option<&AuthUser>,
    id: Uuid,
) -> AppResult<ApiResponse<Recipe>> {
    let model = Recipes::find_by_id(id).one(&state.orm).await?;
    let model = match model {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let recipe = load_view(&state.orm, model, viewer.map(|u| u.user_id)).await?;
    Ok(ApiResponse::success("Recipe", recipe, None))
}

pub async fn create_recipe(
    state: &AppState,
    user: &AuthUser,
    payload: RecipePayload,
) -> AppResult<ApiResponse<Recipe>> {
    payload.validate()?;
    let image = payload.required_image()?;
    ensure_registered(&state.orm, user).await?;
    ensure_references_exist(&state.orm, &payload).await?;

    let txn = state.orm.begin().await?;

    let recipe = recipes::ActiveModel {
        id: Set(Uuid::new_v4()),
        author_id: Set(user.user_id),
        title: Set(payload.title.trim().to_string()),
        image: Set(image),
        description: Set(payload.description.trim().to_string()),
        cooking_time: Set(payload.cooking_time),
        pub_date: NotSet,
    }
    .insert(&txn)
    .await?;

    insert_links(&txn, recipe.id, &payload).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "recipe_create",
        "recipes",
        serde_json::json!({ "recipe_id": recipe.id }),
    )
    .await;
    tracing::info!(recipe_id = %recipe.id, author_id = %user.user_id, "recipe created");

    let view = load_view(&state.orm, recipe, Some(user.user_id)).await?;
    Ok(ApiResponse::success("Recipe created", view, Some(Meta::empty())))
}

/// Full-record update. Ingredient and tag links are deleted and recreated
/// from the payload inside one transaction.
pub async fn update_recipe(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RecipePayload,
) -> AppResult<ApiResponse<Recipe>> {
    payload.validate()?;

    let existing = Recipes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    ensure_owner_or_admin(user, existing.author_id)?;
    ensure_references_exist(&state.orm, &payload).await?;

    let txn = state.orm.begin().await?;

    RecipeIngredients::delete_many()
        .filter(RecipeIngredientCol::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    RecipeTags::delete_many()
        .filter(RecipeTagCol::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    insert_links(&txn, id, &payload).await?;

    let mut active: recipes::ActiveModel = existing.into();
    active.title = Set(payload.title.trim().to_string());
    active.description = Set(payload.description.trim().to_string());
    active.cooking_time = Set(payload.cooking_time);
    if let Some(image) = payload.image.clone() {
        active.image = Set(image);
    }
    let recipe = active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "recipe_update",
        "recipes",
        serde_json::json!({ "recipe_id": recipe.id }),
    )
    .await;

    let view = load_view(&state.orm, recipe, Some(user.user_id)).await?;
    Ok(ApiResponse::success("Updated", view, Some(Meta::empty())))
}

/// Favorites, cart entries and links go with the recipe via `ON DELETE CASCADE`.
pub async fn delete_recipe(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let existing = Recipes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, existing.author_id)?;

    let result = Recipes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "recipe_delete",
        "recipes",
        serde_json::json!({ "recipe_id": id }),
    )
    .await;

    Ok(())
}

async fn ensure_references_exist<C>(db: &C, payload: &RecipePayload) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let ingredient_ids: Vec<Uuid> = payload.ingredients.iter().map(|i| i.id).collect();
    if !ingredient_ids.is_empty() {
        let found = Ingredients::find()
            .filter(IngredientCol::Id.is_in(ingredient_ids.clone()))
            .count(db)
            .await?;
        if found != ingredient_ids.len() as u64 {
            return Err(AppError::validation("ingredients", "unknown ingredient id"));
        }
    }

    if !payload.tags.is_empty() {
        let found = Tags::find()
            .filter(TagCol::Id.is_in(payload.tags.clone()))
            .count(db)
            .await?;
        if found != payload.tags.len() as u64 {
            return Err(AppError::validation("tags", "unknown tag id"));
        }
    }

    Ok(())
}

async fn insert_links<C>(db: &C, recipe_id: Uuid, payload: &RecipePayload) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let ingredient_rows: Vec<recipe_ingredients::ActiveModel> = payload
        .ingredients
        .iter()
        .enumerate()
        .map(|(position, item)| recipe_ingredients::ActiveModel {
            id: Set(Uuid::new_v4()),
            recipe_id: Set(recipe_id),
            ingredient_id: Set(item.id),
            amount: Set(item.amount),
            position: Set(position as i32),
        })
        .collect();
    if !ingredient_rows.is_empty() {
        RecipeIngredients::insert_many(ingredient_rows)
            .exec(db)
            .await?;
    }

    let tag_rows: Vec<recipe_tags::ActiveModel> = payload
        .tags
        .iter()
        .map(|tag_id| recipe_tags::ActiveModel {
            id: Set(Uuid::new_v4()),
            recipe_id: Set(recipe_id),
            tag_id: Set(*tag_id),
        })
        .collect();
    if !tag_rows.is_empty() {
        RecipeTags::insert_many(tag_rows).exec(db).await?;
    }

    Ok(())
}

pub(crate) async fn load_view<C>(
    db: &C,
    model: RecipeModel,
    viewer_id: Option<Uuid>,
) -> AppResult<Recipe>
where
    C: ConnectionTrait,
{
    load_views(db, vec![model], viewer_id)
        .await?
        .pop()
        .ok_or(AppError::NotFound)
}

/// Assemble read views for a batch of recipes with a fixed number of queries.
pub(crate) async fn load_views<C>(
    db: &C,
    models: Vec<RecipeModel>,
    viewer_id: Option<Uuid>,
) -> AppResult<Vec<Recipe>>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let author_ids: Vec<Uuid> = models
        .iter()
        .map(|m| m.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<Uuid, users::Model> = Users::find()
        .filter(UserCol::Id.is_in(author_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut tags: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for (link, tag) in RecipeTags::find()
        .filter(RecipeTagCol::RecipeId.is_in(recipe_ids.clone()))
        .find_also_related(Tags)
        .order_by_asc(TagCol::CreatedAt)
        .all(db)
        .await?
    {
        if let Some(tag) = tag {
            tags.entry(link.recipe_id).or_default().push(tag.into());
        }
    }

    let mut ingredients: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for (link, ingredient) in RecipeIngredients::find()
        .filter(RecipeIngredientCol::RecipeId.is_in(recipe_ids.clone()))
        .find_also_related(Ingredients)
        .order_by_asc(RecipeIngredientCol::Position)
        .all(db)
        .await?
    {
        if let Some(ingredient) = ingredient {
            ingredients
                .entry(link.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    id: ingredient.id,
                    title: ingredient.title,
                    measurement_unit: ingredient.measurement_unit,
                    amount: link.amount,
                });
        }
    }

    let (favorited, in_cart, subscribed) = match viewer_id {
        Some(viewer_id) => {
            let favorited: HashSet<Uuid> = Favorites::find()
                .filter(FavoriteCol::UserId.eq(viewer_id))
                .filter(FavoriteCol::RecipeId.is_in(recipe_ids.clone()))
                .all(db)
                .await?
                .into_iter()
                .map(|f| f.recipe_id)
                .collect();
            let in_cart: HashSet<Uuid> = ShoppingCart::find()
                .filter(CartCol::UserId.eq(viewer_id))
                .filter(CartCol::RecipeId.is_in(recipe_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| c.recipe_id)
                .collect();
            let subscribed = follow_service::followed_among(db, viewer_id, author_ids).await?;
            (favorited, in_cart, subscribed)
        }
        None => Default::default(),
    };

    models
        .into_iter()
        .map(|model| {
            let author = authors.get(&model.author_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("recipe {} has no author row", model.id))
            })?;
            let is_subscribed = subscribed.contains(&author.id);
            Ok(Recipe {
                id: model.id,
                tags: tags.remove(&model.id).unwrap_or_default(),
                author: UserProfile::from_entity(author, is_subscribed),
                ingredients: ingredients.remove(&model.id).unwrap_or_default(),
                is_favorited: favorited.contains(&model.id),
                is_in_shopping_cart: in_cart.contains(&model.id),
                title: model.title,
                image: model.image,
                description: model.description,
                cooking_time: model.cooking_time,
                pub_date: model.pub_date.with_timezone(&Utc),
            })
        })
        .collect()
}
