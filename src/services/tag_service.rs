use sea_orm::{EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    entity::{Tags, tags::Column as TagCol},
    error::{AppError, AppResult},
    models::Tag,
    response::ApiResponse,
    state::AppState,
};

pub async fn list_tags(state: &AppState) -> AppResult<ApiResponse<Vec<Tag>>> {
    let items = Tags::find()
        .order_by_asc(TagCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tag::from)
        .collect();
    Ok(ApiResponse::list("Tags", items))
}

pub async fn get_tag(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Tag>> {
    let tag = Tags::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Tag::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Tag", tag, None))
}
