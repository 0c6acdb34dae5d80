use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{MarkerEntry, RecipeReport},
        recipes::{IngredientAmount, RecipePayload},
        users::RegisterRequest,
    },
    models::{Ingredient, Recipe, RecipeIngredient, RecipeSummary, Subscription, Tag, UserProfile},
    response::Meta,
    routes::{admin, health, ingredients, recipes, tags, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::register,
        users::me,
        users::get_user,
        users::list_subscriptions,
        users::subscribe,
        users::unsubscribe,
        tags::list_tags,
        tags::get_tag,
        ingredients::list_ingredients,
        ingredients::get_ingredient,
        recipes::list_recipes,
        recipes::get_recipe,
        recipes::create_recipe,
        recipes::update_recipe,
        recipes::delete_recipe,
        recipes::add_favorite,
        recipes::remove_favorite,
        recipes::add_to_cart,
        recipes::remove_from_cart,
        recipes::download_shopping_cart,
        admin::recipe_report,
        admin::list_favorites,
        admin::list_shopping_cart
    ),
    components(
        schemas(
            UserProfile,
            Tag,
            Ingredient,
            RecipeIngredient,
            Recipe,
            RecipeSummary,
            Subscription,
            RegisterRequest,
            RecipePayload,
            IngredientAmount,
            RecipeReport,
            MarkerEntry,
            Meta
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration, profiles and subscriptions"),
        (name = "Tags", description = "Recipe tags"),
        (name = "Ingredients", description = "Ingredient catalogue"),
        (name = "Recipes", description = "Recipe endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Shopping cart", description = "Shopping cart and list export"),
        (name = "Admin", description = "Admin reporting endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
