use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::RegisterRequest,
    entity::{
        Users,
        users::{self, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_USER},
    models::UserProfile,
    response::{ApiResponse, Meta},
    services::follow_service,
    state::AppState,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    payload.validate()?;
    let RegisterRequest {
        email,
        username,
        first_name,
        last_name,
        password,
    } = payload;

    let email_taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let username_taken = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    if username_taken.is_some() {
        return Err(AppError::BadRequest("Username is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        username: Set(username),
        first_name: Set(first_name),
        last_name: Set(last_name),
        password_hash: Set(password_hash),
        role: Set(ROLE_USER.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::success(
        "User created",
        UserProfile::from_entity(user, false),
        Some(Meta::empty()),
    ))
}

pub async fn current_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<UserProfile>> {
    let model = ensure_registered(&state.orm, user).await?;
    Ok(ApiResponse::success("OK", UserProfile::from_entity(model, false), None))
}

pub async fn get_user(
    state: &AppState,
    viewer: Option<&AuthUser>,
    id: Uuid,
) -> AppResult<ApiResponse<UserProfile>> {
    let model = Users::find_by_id(id).one(&state.orm).await?;
    let model = match model {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };

    let is_subscribed = match viewer {
        Some(viewer) => follow_service::followed_among(&state.orm, viewer.user_id, vec![id])
            .await?
            .contains(&id),
        None => false,
    };

    Ok(ApiResponse::success("OK", UserProfile::from_entity(model, is_subscribed), None))
}

/// Tokens come from an external issuer, so the subject may have no row here.
pub async fn ensure_registered<C>(db: &C, user: &AuthUser) -> AppResult<users::Model>
where
    C: ConnectionTrait,
{
    Users::find_by_id(user.user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".into()))
}
