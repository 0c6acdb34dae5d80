use recipe_share_api::services::shopping_list::{
    FILE_NAME, ShoppingListItem, ShoppingListRow, aggregate, render,
};

fn row(title: &str, unit: &str, amount: i32) -> ShoppingListRow {
    ShoppingListRow {
        title: title.to_string(),
        measurement_unit: unit.to_string(),
        amount,
    }
}

#[test]
fn shared_ingredient_is_summed_into_one_line() {
    let items = aggregate(vec![row("flour", "g", 200), row("flour", "g", 300)]);
    assert_eq!(render(&items), "flour - 500 g\n");
}

#[test]
fn lines_follow_first_encountered_order() {
    let items = aggregate(vec![
        row("milk", "ml", 250),
        row("flour", "g", 200),
        row("eggs", "pcs", 2),
        row("flour", "g", 150),
        row("milk", "ml", 50),
    ]);

    assert_eq!(
        items,
        vec![
            ShoppingListItem {
                title: "milk".into(),
                measurement_unit: "ml".into(),
                amount: 300,
            },
            ShoppingListItem {
                title: "flour".into(),
                measurement_unit: "g".into(),
                amount: 350,
            },
            ShoppingListItem {
                title: "eggs".into(),
                measurement_unit: "pcs".into(),
                amount: 2,
            },
        ]
    );
    assert_eq!(
        render(&items),
        "milk - 300 ml\nflour - 350 g\neggs - 2 pcs\n"
    );
}

#[test]
fn same_name_with_different_units_stays_separate() {
    let items = aggregate(vec![
        row("sugar", "g", 100),
        row("sugar", "tbsp", 2),
        row("sugar", "g", 50),
    ]);

    assert_eq!(render(&items), "sugar - 150 g\nsugar - 2 tbsp\n");
}

#[test]
fn zero_amounts_are_kept() {
    let items = aggregate(vec![row("salt", "pinch", 0)]);
    assert_eq!(render(&items), "salt - 0 pinch\n");
}

#[test]
fn large_totals_do_not_overflow() {
    let items = aggregate(vec![row("water", "ml", i32::MAX), row("water", "ml", i32::MAX)]);
    assert_eq!(items[0].amount, 2 * i64::from(i32::MAX));
}

#[test]
fn empty_cart_renders_empty_list() {
    let items = aggregate(Vec::new());
    assert!(items.is_empty());
    assert_eq!(render(&items), "");
}

#[test]
fn export_file_name() {
    assert_eq!(FILE_NAME, "wishlist.txt");
}
