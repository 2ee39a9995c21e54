/// Calorie Server - Multi-user calorie tracking API
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use calorie_core::{NewUser, UserStore};
use calorie_server::{
    api, config::ServerConfig, middleware, services::AuthService, state::AppState,
};
use calorie_storage::Database;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "calorie-server")]
#[command(about = "Calorie tracker API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user account
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Contact email
        #[arg(short, long)]
        email: String,
    },
    /// List all user accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calorie_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            username,
            password,
            email,
        } => {
            add_user(&username, &password, &email).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Calorie Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_lifetime_hours,
    ));
    tracing::info!("Auth service initialized");

    // Build application state and router
    let app_state = AppState::new(db, auth_service);
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/login", post(api::auth::login))
        .route("/signup", post(api::auth::signup));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/secure", get(api::auth::secure))
        // User profiles
        .route("/users", get(api::users::list_users))
        .route("/users/:username", get(api::users::get_user))
        .route("/users/:username", put(api::users::update_user))
        .route("/users/:username", delete(api::users::delete_user))
        // Food logs
        .route("/users/:username/foodlog", get(api::foodlog::get_food_log))
        .route("/users/:username/foodlog/:date", get(api::foodlog::get_daily_log))
        .route("/users/:username/foodlog/:date", post(api::foodlog::add_meal))
        .route("/users/:username/foodlog/:date/:id", put(api::foodlog::update_meal))
        .route("/users/:username/foodlog/:date/:id", delete(api::foodlog::delete_meal))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    // Combine routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(username: &str, password: &str, email: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = Database::new(&config.storage.database_url).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_lifetime_hours,
    );

    let password_hash = auth_service.hash_password(password)?;
    let user = db
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
        })
        .await?;

    println!("Created account {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = Database::new(&config.storage.database_url).await?;

    let users = db.all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.username, user.email);
    }

    Ok(())
}
