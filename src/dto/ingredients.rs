use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct IngredientQuery {
    /// Case-insensitive prefix of the ingredient title.
    pub name: Option<String>,
}
