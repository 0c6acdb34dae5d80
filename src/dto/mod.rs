pub mod admin;
pub mod ingredients;
pub mod recipes;
pub mod users;
