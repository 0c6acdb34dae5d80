use std::collections::HashSet;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 10_000;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientAmount {
    /// Ingredient id.
    pub id: Uuid,
    pub amount: i32,
}

/// Write view of a recipe, used by both create and update.
///
/// Update is a full replace: every field except `image` must be sent, and
/// the ingredient and tag lists overwrite the stored ones.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipePayload {
    pub title: String,
    pub description: String,
    /// Image reference; required on create, kept as-is on update when absent.
    pub image: Option<String>,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<Uuid>,
}

impl RecipePayload {
    /// Field checks that need no database access.
    pub fn validate(&self) -> AppResult<()> {
        let title_len = self.title.trim().chars().count();
        if title_len == 0 || title_len > TITLE_MAX_CHARS {
            return Err(AppError::validation(
                "title",
                format!("title must be between 1 and {TITLE_MAX_CHARS} characters"),
            ));
        }

        let description_len = self.description.trim().chars().count();
        if description_len == 0 || description_len > DESCRIPTION_MAX_CHARS {
            return Err(AppError::validation(
                "description",
                format!("description must be between 1 and {DESCRIPTION_MAX_CHARS} characters"),
            ));
        }

        if self.cooking_time <= 0 {
            return Err(AppError::validation(
                "cooking_time",
                "cooking time must be a positive integer",
            ));
        }

        if self.ingredients.iter().any(|item| item.amount < 0) {
            return Err(AppError::validation(
                "ingredients",
                "ingredient amount must be non-negative",
            ));
        }

        let mut seen = HashSet::new();
        if !self.ingredients.iter().all(|item| seen.insert(item.id)) {
            return Err(AppError::validation(
                "ingredients",
                "each ingredient may be listed only once",
            ));
        }

        let mut seen = HashSet::new();
        if !self.tags.iter().all(|id| seen.insert(*id)) {
            return Err(AppError::validation("tags", "each tag may be listed only once"));
        }

        if self
            .image
            .as_deref()
            .is_some_and(|image| image.trim().is_empty())
        {
            return Err(AppError::validation("image", "image must not be empty"));
        }

        Ok(())
    }

    /// Image for a new recipe; create has nothing to fall back on.
    pub fn required_image(&self) -> AppResult<String> {
        self.image
            .clone()
            .ok_or_else(|| AppError::validation("image", "image is required"))
    }
}
