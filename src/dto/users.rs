use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        if !self.email.contains('@') || self.email.len() > 254 {
            return Err(AppError::validation("email", "enter a valid email address"));
        }
        if self.username.trim().is_empty() || self.username.chars().count() > 150 {
            return Err(AppError::validation(
                "username",
                "username must be between 1 and 150 characters",
            ));
        }
        if self.first_name.chars().count() > 150 {
            return Err(AppError::validation("first_name", "at most 150 characters"));
        }
        if self.last_name.chars().count() > 150 {
            return Err(AppError::validation("last_name", "at most 150 characters"));
        }
        if self.password.len() < 8 {
            return Err(AppError::validation("password", "password must be at least 8 characters"));
        }
        Ok(())
    }
}
