use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::ingredients::IngredientQuery,
    entity::{Ingredients, ingredients::Column as IngredientCol},
    error::{AppError, AppResult},
    models::Ingredient,
    response::ApiResponse,
    state::AppState,
};

pub async fn list_ingredients(
    state: &AppState,
    query: IngredientQuery,
) -> AppResult<ApiResponse<Vec<Ingredient>>> {
    let mut finder = Ingredients::find();

    if let Some(name) = query.name.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("{}%", escape_like(name));
        finder = finder.filter(Expr::col(IngredientCol::Title).ilike(pattern));
    }

    let items = finder
        .order_by_asc(IngredientCol::Title)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Ingredient::from)
        .collect();
    Ok(ApiResponse::list("Ingredients", items))
}

pub async fn get_ingredient(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Ingredient>> {
    let result = Ingredients::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Ingredient::from);
    let result = match result {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Ingredient", result, None))
}

/// Escape LIKE wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
