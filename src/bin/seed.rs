use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use recipe_share_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    middleware::auth::{ROLE_ADMIN, ROLE_USER},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 1).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(
        &pool,
        "admin@example.com",
        "admin",
        "admin12345",
        ROLE_ADMIN,
    )
    .await?;
    let user_id = ensure_user(
        &pool,
        "cook@example.com",
        "cook",
        "cook12345",
        ROLE_USER,
    )
    .await?;
    seed_tags(&pool).await?;
    seed_ingredients(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    username: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, username, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_tags(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let tags = [
        ("Breakfast", "#E26C2D", "breakfast"),
        ("Lunch", "#49B64E", "lunch"),
        ("Dinner", "#8775D2", "dinner"),
    ];

    for (title, color, slug) in tags {
        sqlx::query(
            r#"
            INSERT INTO tags (id, title, color, slug)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(color)
        .bind(slug)
        .execute(pool)
        .await?;
    }

    println!("Seeded tags");
    Ok(())
}

async fn seed_ingredients(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let ingredients = [
        ("flour", "g"),
        ("sugar", "g"),
        ("salt", "g"),
        ("butter", "g"),
        ("milk", "ml"),
        ("water", "ml"),
        ("eggs", "pcs"),
        ("onion", "pcs"),
        ("olive oil", "tbsp"),
        ("black pepper", "pinch"),
    ];

    for (title, unit) in ingredients {
        sqlx::query(
            r#"
            INSERT INTO ingredients (id, title, measurement_unit)
            VALUES ($1, $2, $3)
            ON CONFLICT (title, measurement_unit) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(unit)
        .execute(pool)
        .await?;
    }

    println!("Seeded ingredients");
    Ok(())
}
