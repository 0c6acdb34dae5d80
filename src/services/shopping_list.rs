use std::collections::{HashMap, hash_map::Entry};

use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

pub const FILE_NAME: &str = "wishlist.txt";

/// One ingredient-amount row of a recipe sitting in someone's cart.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShoppingListRow {
    pub title: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub title: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sum amounts per `(title, measurement_unit)`, keeping first-seen order.
pub fn aggregate<I>(rows: I) -> Vec<ShoppingListItem>
where
    I: IntoIterator<Item = ShoppingListRow>,
{
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut items: Vec<ShoppingListItem> = Vec::new();

    for row in rows {
        match index.entry((row.title, row.measurement_unit)) {
            Entry::Occupied(slot) => items[*slot.get()].amount += i64::from(row.amount),
            Entry::Vacant(slot) => {
                let (title, measurement_unit) = slot.key().clone();
                slot.insert(items.len());
                items.push(ShoppingListItem {
                    title,
                    measurement_unit,
                    amount: i64::from(row.amount),
                });
            }
        }
    }

    items
}

/// One `"<title> - <amount> <unit>"` line per item.
pub fn render(items: &[ShoppingListItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} - {} {}\n",
                item.title, item.amount, item.measurement_unit
            )
        })
        .collect()
}

pub async fn fetch_rows(pool: &DbPool, user_id: Uuid) -> AppResult<Vec<ShoppingListRow>> {
    let rows = sqlx::query_as::<_, ShoppingListRow>(
        r#"
        SELECT i.title, i.measurement_unit, ri.amount
        FROM shopping_cart sc
        JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE sc.user_id = $1
        ORDER BY sc.added_date, sc.id, ri.position
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn build(pool: &DbPool, user_id: Uuid) -> AppResult<String> {
    let rows = fetch_rows(pool, user_id).await?;
    let items = aggregate(rows);
    tracing::debug!(%user_id, items = items.len(), "shopping list built");
    Ok(render(&items))
}
