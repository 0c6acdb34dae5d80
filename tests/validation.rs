use recipe_share_api::{
    dto::{
        recipes::{IngredientAmount, RecipePayload},
        users::RegisterRequest,
    },
    error::{AppError, body_field},
    services::ingredient_service::escape_like,
};
use uuid::Uuid;

fn payload() -> RecipePayload {
    RecipePayload {
        title: "Pancakes".into(),
        description: "Mix everything and fry on a hot pan.".into(),
        image: Some("recipes/pancakes.png".into()),
        cooking_time: 20,
        ingredients: vec![
            IngredientAmount {
                id: Uuid::new_v4(),
                amount: 200,
            },
            IngredientAmount {
                id: Uuid::new_v4(),
                amount: 0,
            },
        ],
        tags: vec![Uuid::new_v4()],
    }
}

fn rejected_field(result: Result<(), AppError>) -> &'static str {
    match result {
        Err(AppError::Validation { field, .. }) => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn valid_payload_passes() {
    let payload = payload();
    assert!(payload.validate().is_ok());
    assert_eq!(
        payload.required_image().expect("image"),
        "recipes/pancakes.png"
    );
}

#[test]
fn non_positive_cooking_time_is_rejected() {
    for cooking_time in [0, -1, i32::MIN] {
        let mut payload = payload();
        payload.cooking_time = cooking_time;
        assert_eq!(rejected_field(payload.validate()), "cooking_time");
    }
}

#[test]
fn negative_amount_is_rejected() {
    let mut payload = payload();
    payload.ingredients[1].amount = -1;
    assert_eq!(rejected_field(payload.validate()), "ingredients");
}

#[test]
fn repeated_ingredient_is_rejected() {
    let mut payload = payload();
    let id = payload.ingredients[0].id;
    payload.ingredients.push(IngredientAmount { id, amount: 5 });
    assert_eq!(rejected_field(payload.validate()), "ingredients");
}

#[test]
fn repeated_tag_is_rejected() {
    let mut payload = payload();
    let id = payload.tags[0];
    payload.tags.push(id);
    assert_eq!(rejected_field(payload.validate()), "tags");
}

#[test]
fn blank_or_long_title_is_rejected() {
    let mut payload = payload();
    payload.title = "   ".into();
    assert_eq!(rejected_field(payload.validate()), "title");

    payload.title = "x".repeat(101);
    assert_eq!(rejected_field(payload.validate()), "title");
}

#[test]
fn blank_description_is_rejected() {
    let mut payload = payload();
    payload.description = String::new();
    assert_eq!(rejected_field(payload.validate()), "description");
}

#[test]
fn image_is_optional_for_update_but_required_for_create() {
    let mut payload = payload();
    payload.image = None;
    assert!(payload.validate().is_ok());
    assert_eq!(rejected_field(payload.required_image().map(|_| ())), "image");

    payload.image = Some("  ".into());
    assert_eq!(rejected_field(payload.validate()), "image");
}

#[test]
fn payload_deserializes_from_api_json() {
    let ingredient = Uuid::new_v4();
    let tag = Uuid::new_v4();
    let json = serde_json::json!({
        "title": "Soup",
        "description": "Boil.",
        "cooking_time": 30,
        "ingredients": [{ "id": ingredient, "amount": 3 }],
        "tags": [tag],
    });

    let payload: RecipePayload = serde_json::from_value(json).expect("payload");
    assert!(payload.image.is_none());
    assert_eq!(payload.ingredients[0].id, ingredient);
    assert_eq!(payload.ingredients[0].amount, 3);
    assert_eq!(payload.tags, vec![tag]);
}

#[test]
fn registration_checks_fields() {
    let request = RegisterRequest {
        email: "cook@example.com".into(),
        username: "cook".into(),
        first_name: "Ada".into(),
        last_name: "Baker".into(),
        password: "long-enough".into(),
    };
    assert!(request.validate().is_ok());

    let bad_email = RegisterRequest {
        email: "not-an-email".into(),
        ..request
    };
    assert_eq!(rejected_field(bad_email.validate()), "email");
}

#[test]
fn short_password_is_rejected() {
    let request = RegisterRequest {
        email: "cook@example.com".into(),
        username: "cook".into(),
        first_name: String::new(),
        last_name: String::new(),
        password: "short".into(),
    };
    assert_eq!(rejected_field(request.validate()), "password");
}

#[test]
fn like_wildcards_are_escaped() {
    assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    assert_eq!(escape_like("flour"), "flour");
}

#[test]
fn body_field_reads_deserializer_paths() {
    let float = body_field("cooking_time: invalid type: floating point `2.5`, expected i32");
    assert_eq!(float.as_deref(), Some("cooking_time"));

    let nested = body_field("ingredients[0].amount: invalid value: integer `3000000000`");
    assert_eq!(nested.as_deref(), Some("ingredients"));

    let missing = body_field("missing field `title` at line 1 column 80");
    assert_eq!(missing.as_deref(), Some("title"));

    assert_eq!(body_field("expected value at line 1 column 1"), None);
}
