use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::users::RegisterRequest,
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::{Subscription, UserProfile},
    response::ApiResponse,
    services::{follow_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/me", get(me))
        .route("/subscriptions", get(list_subscriptions))
        .route("/{id}", get(get_user))
        .route("/{id}/subscribe", get(subscribe).delete(unsubscribe))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<UserProfile>),
        (status = 400, description = "Invalid payload or email/username taken")
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserProfile>>)> {
    let resp = user_service::register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserProfile>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::current_user(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserProfile>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::get_user(&state, user.as_ref(), id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    responses(
        (status = 200, description = "Authors the current user follows", body = ApiResponse<Vec<Subscription>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Subscription>>>> {
    let resp = follow_service::list_subscriptions(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/subscribe",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse<Subscription>),
        (status = 400, description = "Self-subscription or already subscribed"),
        (status = 404, description = "Author not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ApiResponse<Subscription>>)> {
    let resp = follow_service::subscribe(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "Subscription not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    follow_service::unsubscribe(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
