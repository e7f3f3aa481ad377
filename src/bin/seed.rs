use krishimitra::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    models::Role,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", "Admin", Role::Admin).await?;
    let user_id = ensure_user(&pool, "user@example.com", "user123", "Asha Buyer", Role::User).await?;
    let farmer_id =
        ensure_user(&pool, "farmer@example.com", "farmer123", "Ravi Kumar", Role::Farmer).await?;
    seed_farm(&pool, farmer_id).await?;
    seed_listings(&pool, farmer_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}, Farmer ID: {farmer_id}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, role, approval_status, reviewed_at)
        VALUES ($1, $2, $3, $4, $5, $6, now())
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role.as_str())
    .bind("approved")
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_farm(pool: &DbPool, farmer_id: Uuid) -> anyhow::Result<()> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM farms WHERE farmer_id = $1 AND name = $2")
            .bind(farmer_id)
            .bind("Green Valley Farm")
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        println!("Farm already seeded");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    let farm_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO farms (id, farmer_id, name, state, district, village, pincode,
                           land_size, land_unit, farming_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(farm_id)
    .bind(farmer_id)
    .bind("Green Valley Farm")
    .bind("Himachal Pradesh")
    .bind("Shimla")
    .bind("Kotkhai")
    .bind("171202")
    .bind(4.5_f64)
    .bind("acres")
    .bind("organic")
    .execute(&mut *tx)
    .await?;

    for crop in ["Apples", "Pears", "Plums"] {
        sqlx::query("INSERT INTO farm_crops (id, farm_id, crop_name) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(farm_id)
            .bind(crop)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    println!("Seeded farm {farm_id}");
    Ok(())
}

async fn seed_listings(pool: &DbPool, farmer_id: Uuid) -> anyhow::Result<()> {
    let listings = vec![
        ("Shimla Apples", "Crisp hill apples", "fruits", "kg", 9_900_i64, 120),
        ("Organic Plums", "Hand picked, no pesticides", "organic", "kg", 14_000, 40),
        ("Fresh Pears", "Juicy and sweet", "fruits", "pcs", 2_500, 0),
    ];

    for (name, desc, category, unit, price, stock) in listings {
        sqlx::query(
            r#"
            INSERT INTO farmer_products (id, farmer_id, name, description, category, unit, price, stock)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (
                SELECT 1 FROM farmer_products WHERE farmer_id = $2 AND name = $3
            )
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(farmer_id)
        .bind(name)
        .bind(desc)
        .bind(category)
        .bind(unit)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded listings");
    Ok(())
}
