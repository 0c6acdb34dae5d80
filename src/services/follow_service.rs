use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit,
    entity::{
        Follows, Recipes, Users,
        follows::{self, Column as FollowCol},
        recipes::Column as RecipeCol,
        users::{self, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{RecipeSummary, Subscription, UserProfile},
    response::{ApiResponse, Meta},
    services::user_service::ensure_registered,
    state::AppState,
};

/// Start following `author_id`.
///
/// Self-follow and duplicate checks run here rather than in the handler so
/// any caller that creates a follow goes through them.
pub async fn subscribe(
    state: &AppState,
    user: &AuthUser,
    author_id: Uuid,
) -> AppResult<ApiResponse<Subscription>> {
    if user.user_id == author_id {
        return Err(AppError::BadRequest("You cannot subscribe to yourself".into()));
    }

    let author = Users::find_by_id(author_id).one(&state.orm).await?;
    let author = match author {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    ensure_registered(&state.orm, user).await?;

    let existing = Follows::find()
        .filter(FollowCol::UserId.eq(user.user_id))
        .filter(FollowCol::AuthorId.eq(author_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest("Already subscribed to this author".into()));
    }

    follows::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        author_id: Set(author_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "follow_add",
        "follows",
        serde_json::json!({ "author_id": author_id }),
    )
    .await;

    let subscription = build_subscriptions(state, vec![author])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Subscribed", subscription, Some(Meta::empty())))
}

pub async fn unsubscribe(state: &AppState, user: &AuthUser, author_id: Uuid) -> AppResult<()> {
    let result = Follows::delete_many()
        .filter(FollowCol::UserId.eq(user.user_id))
        .filter(FollowCol::AuthorId.eq(author_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "follow_remove",
        "follows",
        serde_json::json!({ "author_id": author_id }),
    )
    .await;

    Ok(())
}

pub async fn list_subscriptions(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<Subscription>>> {
    let follows = Follows::find()
        .filter(FollowCol::UserId.eq(user.user_id))
        .order_by_desc(FollowCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let author_ids: Vec<Uuid> = follows.iter().map(|f| f.author_id).collect();
    let mut authors: HashMap<Uuid, users::Model> = if author_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(UserCol::Id.is_in(author_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    let ordered: Vec<users::Model> = follows
        .iter()
        .filter_map(|follow| authors.remove(&follow.author_id))
        .collect();
    let items = build_subscriptions(state, ordered).await?;

    Ok(ApiResponse::list("OK", items))
}

/// Ids among `author_ids` that `viewer_id` follows.
pub async fn followed_among<C>(
    db: &C,
    viewer_id: Uuid,
    author_ids: Vec<Uuid>,
) -> AppResult<HashSet<Uuid>>
where
    C: ConnectionTrait,
{
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let followed = Follows::find()
        .filter(FollowCol::UserId.eq(viewer_id))
        .filter(FollowCol::AuthorId.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|f| f.author_id)
        .collect();

    Ok(followed)
}

#[derive(Debug, FromRow)]
struct LatestRecipe {
    author_id: Uuid,
    id: Uuid,
    title: String,
    image: String,
    cooking_time: i32,
}

/// Subscription entries for `authors`, in the given order, with a fixed
/// number of queries: one for recipe counts and one for the newest recipes.
async fn build_subscriptions(
    state: &AppState,
    authors: Vec<users::Model>,
) -> AppResult<Vec<Subscription>> {
    if authors.is_empty() {
        return Ok(Vec::new());
    }
    let author_ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();

    let counts: HashMap<Uuid, i64> = Recipes::find()
        .select_only()
        .column(RecipeCol::AuthorId)
        .column_as(Expr::col(RecipeCol::Id).count(), "recipes_count")
        .filter(RecipeCol::AuthorId.is_in(author_ids.clone()))
        .group_by(RecipeCol::AuthorId)
        .into_tuple::<(Uuid, i64)>()
        .all(&state.orm)
        .await?
        .into_iter()
        .collect();

    let latest = sqlx::query_as::<_, LatestRecipe>(
        r#"
        SELECT author_id, id, title, image, cooking_time
        FROM (
            SELECT r.author_id, r.id, r.title, r.image, r.cooking_time, r.pub_date,
                   ROW_NUMBER() OVER (
                       PARTITION BY r.author_id ORDER BY r.pub_date DESC, r.id
                   ) AS rn
            FROM recipes r
            WHERE r.author_id = ANY($1)
        ) ranked
        WHERE rn <= $2
        ORDER BY author_id, pub_date DESC, id
        "#,
    )
    .bind(&author_ids)
    .bind(state.config.recipes_limit as i64)
    .fetch_all(&state.pool)
    .await?;

    let mut recipes: HashMap<Uuid, Vec<RecipeSummary>> = HashMap::new();
    for row in latest {
        recipes.entry(row.author_id).or_default().push(RecipeSummary {
            id: row.id,
            title: row.title,
            image: row.image,
            cooking_time: row.cooking_time,
        });
    }

    Ok(authors
        .into_iter()
        .map(|author| Subscription {
            recipes: recipes.remove(&author.id).unwrap_or_default(),
            recipes_count: counts.get(&author.id).copied().unwrap_or(0),
            author: UserProfile::from_entity(author, true),
        })
        .collect())
}
