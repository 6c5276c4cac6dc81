use aicampus::{ai, build_router, db, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aicampus=info,tower_http=info")),
        )
        .init();

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(dotenv::var("DATABASE_URL").unwrap().as_str())
        .await
        .unwrap();
    db::init(&db_pool).await.unwrap();

    let app = build_router(AppState {
        db_pool,
        ai: ai::AiClients::from_env(),
        tx: broadcast::channel(256).0,
    });

    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!(%bind_addr, "listening");
    axum::serve(listener, app).await.unwrap();
}
