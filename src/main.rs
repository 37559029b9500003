mod db;
mod error;
mod models;
mod pricing;
mod promotions;
mod validation;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use validator::Validate;

use error::ApiError;
use models::{CreateProduct, Product, ProductResponse, SizeVariant};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        get_all_products,
        get_product_by_id,
    ),
    components(
        schemas(Product, SizeVariant, CreateProduct, models::CreateSizeVariant, ProductResponse)
    ),
    tags(
        (name = "products", description = "Product catalog management endpoints")
    ),
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Order-intake backend for a retail catalog with promotion-aware cart pricing",
        contact(
            name = "API Support",
            email = "support@catalogapi.com"
        )
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

/// Handler for POST /api/products
/// Creates a new product with its size variants
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error": "Unit price must be a positive number"})),
        (status = 409, description = "Duplicate product name", body = String, example = json!({"error": "Product already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "products"
)]
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    tracing::debug!("Creating new product: {}", payload.name);

    // Validate the request using validator crate
    payload.validate()?;

    // Check for duplicate product name
    if db::check_duplicate_product(&state.db, &payload.name).await? {
        tracing::warn!("Attempt to create duplicate product: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Product with name '{}' already exists", payload.name),
        });
    }

    // Insert product and its size variants atomically
    let mut tx = state.db.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, image_url, is_visible)
        VALUES ($1, $2, $3)
        RETURNING id, name, image_url, is_visible, created_at, updated_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.image_url)
    .bind(payload.is_visible)
    .fetch_one(&mut *tx)
    .await?;

    let mut sizes = Vec::with_capacity(payload.sizes.len());
    for size in &payload.sizes {
        let variant = sqlx::query_as::<_, SizeVariant>(
            r#"
            INSERT INTO product_sizes (product_id, label, unit_price)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, label, unit_price
            "#,
        )
        .bind(product.id)
        .bind(size.label.trim())
        .bind(size.unit_price)
        .fetch_one(&mut *tx)
        .await?;
        sizes.push(variant);
    }

    tx.commit().await?;

    tracing::info!("Successfully created product with id: {}", product.id);
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::from_parts(product, sizes)),
    ))
}

/// Handler for GET /api/products
/// Retrieves all products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "products"
)]
async fn get_all_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    tracing::debug!("Fetching all products");

    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, image_url, is_visible, created_at, updated_at
        FROM products
        ORDER BY id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} products", products.len());
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
/// Retrieves a specific product with its size variants
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = String, example = json!({"error": "Product with id 1 not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "products"
)]
async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ApiError> {
    tracing::debug!("Fetching product with id: {}", id);

    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, image_url, is_visible, created_at, updated_at
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Product with id {} not found", id);
        ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        }
    })?;

    let sizes = sqlx::query_as::<_, SizeVariant>(
        r#"
        SELECT id, product_id, label, unit_price
        FROM product_sizes
        WHERE product_id = $1
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Successfully retrieved product: {}", product.name);
    Ok(Json(ProductResponse::from_parts(product, sizes)))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState { db };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Product catalog routes
        .route("/api/products", post(create_product))
        .route("/api/products", get(get_all_products))
        .route("/api/products/:id", get(get_product_by_id))
        // Promotion routes
        .route("/api/promotions", post(promotions::create_promotion_handler))
        .route(
            "/api/products/:product_id/promotions",
            get(promotions::get_product_promotions_handler),
        )
        .route(
            "/api/promotions/:id/visibility",
            patch(promotions::update_promotion_visibility_handler),
        )
        // Cart pricing
        .route("/api/cart/calculate", post(pricing::calculate_cart_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Catalog API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Catalog API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
