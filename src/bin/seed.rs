use sea_orm::DatabaseConnection;
use uuid::Uuid;
use wishlist_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    middleware::auth::{ADMIN_ROLE, MEMBER_ROLE},
    repository::{
        self,
        members::NewMember,
        products::NewProduct,
    },
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_member(&orm, "admin@example.com", "admin123", "Admin", ADMIN_ROLE).await?;
    let member_id = ensure_member(&orm, "user@example.com", "user123", "Member", MEMBER_ROLE).await?;
    seed_products(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, Member ID: {member_id}");
    Ok(())
}

async fn ensure_member(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = repository::members::find_by_email(orm, email).await? {
        println!("Member {email} already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let member = repository::members::insert(
        orm,
        NewMember {
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
            role: role.to_string(),
        },
    )
    .await?;

    println!("Ensured member {email} (role={role})");
    Ok(member.id)
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let products = vec![
        ("Americano", 4500, "https://cdn.example.com/products/americano.jpg"),
        ("Iced Cafe Latte", 5000, "https://cdn.example.com/products/latte.jpg"),
        ("Ferris Mug", 12000, "https://cdn.example.com/products/ferris-mug.jpg"),
        ("Cake [Choco]", 28000, "https://cdn.example.com/products/choco-cake.jpg"),
    ];

    for (name, price, image_url) in products {
        let inserted = repository::products::insert(
            orm,
            NewProduct {
                name: name.to_string(),
                price,
                image_url: image_url.to_string(),
            },
        )
        .await;
        match inserted {
            Ok(product) => println!("Seeded product {} ({})", product.name, product.id),
            Err(err) if wishlist_api::error::is_constraint_violation(&err) => {
                println!("Product {name} already present")
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
