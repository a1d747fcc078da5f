use pantry_chef::{
    api::{self, AppState},
    auth::TokenVerifier,
    create_pool, AppConfig, PgStore, SuggestionService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url, config.database.connections).await?;
    info!("Database pool created");

    let store = Arc::new(PgStore::new(pool));
    let state = AppState {
        suggestions: Arc::new(SuggestionService::new(store)),
        verifier: Arc::new(TokenVerifier::new(&config.auth.secret)),
    };

    let app = api::router(state);

    // 启动服务器
    let addr = config.listen_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /health");
    info!("  GET /users/:user_id/suggestions?servings=<n>");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
