pub mod admin_service;
pub mod cart_service;
pub mod favorite_service;
pub mod follow_service;
pub mod ingredient_service;
pub mod recipe_service;
pub mod shopping_list;
pub mod tag_service;
pub mod user_service;
