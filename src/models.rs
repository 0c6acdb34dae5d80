use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{ingredients, recipes, tags, users};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the caller follows this user.
    pub is_subscribed: bool,
}

impl UserProfile {
    pub fn from_entity(model: users::Model, is_subscribed: bool) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            is_subscribed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
    pub color: String,
    pub slug: String,
}

impl From<tags::Model> for Tag {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            color: model.color,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub title: String,
    pub measurement_unit: String,
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            measurement_unit: model.measurement_unit,
        }
    }
}

/// Ingredient as it appears inside a recipe, with its amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub title: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub tags: Vec<Tag>,
    pub author: UserProfile,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub title: String,
    pub image: String,
    pub description: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// Compact recipe view used by favorites, the cart and subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<recipes::Model> for RecipeSummary {
    fn from(model: recipes::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image: model.image,
            cooking_time: model.cooking_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Subscription {
    #[serde(flatten)]
    pub author: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}
