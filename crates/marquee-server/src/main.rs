//! Marquee Server
//!
//! Server-rendered movie and celebrity catalog: browse, search and edit
//! movies, celebrities and who was cast in what, with session-based login.
//!
//! Uses SQLite (embedded) for the catalog by default.

mod error;
mod extractors;
mod handlers;
mod services;
mod settings;
mod storage;
mod views;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use marquee_core::{CatalogStore, MemoryStore, SessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use services::AuthService;
use settings::{Settings, StorageBackend};
use storage::{Database, MemorySessions};
use views::Views;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth_service: Arc<AuthService>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, sessions: Arc<dyn SessionStore>, views: Views) -> Self {
        let auth_service = Arc::new(AuthService::new(store.clone()));
        Self {
            store,
            sessions,
            auth_service,
            views: Arc::new(views),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Marquee Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}, db={}",
        settings.bind_address, settings.storage, settings.database_path
    );

    let store: Arc<dyn CatalogStore> = match settings.storage {
        StorageBackend::Sqlite => Arc::new(
            Database::new(&settings.database_path)
                .await
                .context("Failed to initialize database")?,
        ),
        StorageBackend::Memory => {
            info!("Using in-memory storage, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let views = Views::load().context("Failed to load templates")?;
    let state = AppState::new(store, Arc::new(MemorySessions::new()), views);
    let app = app(state);

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Full router with state applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(catalog_routes())
        .merge(user_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::render_error_page,
        ))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    use handlers::{cast, celebrities, movies};

    Router::new()
        .route(
            "/celebrities",
            get(celebrities::list).post(celebrities::create),
        )
        .route("/celebrities/new", get(celebrities::new_form))
        .route(
            "/celebrities/:id",
            get(celebrities::show).post(celebrities::update),
        )
        .route("/celebrities/:id/edit", get(celebrities::edit_form))
        .route("/celebrities/:id/delete", post(celebrities::delete))
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/new", get(movies::new_form))
        .route("/movies/:id", get(movies::show).post(movies::update))
        .route("/movies/:id/edit", get(movies::edit_form))
        .route("/movies/:id/delete", post(movies::delete))
        .route("/cast", get(cast::list).post(cast::create))
        .route("/cast/new", get(cast::new_form))
        .route("/cast/:id/delete", post(cast::delete))
}

fn user_routes() -> Router<AppState> {
    use handlers::{auth, users};

    Router::new()
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/profile", get(users::profile))
}
