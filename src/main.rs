use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auth_server::routes::create_app;
use auth_server::shared::config::AppConfig;
use auth_server::shared::services::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,auth_server=debug,tower_http=debug")),
        )
        .init();

    // 설정 로드 (한 번만, 이후 불변)
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let bind_addr = config.server.bind_addr.clone();

    // AppState 생성 (저장소 + 서비스 초기화)
    let app_state = AppState::from_config(config)
        .await
        .context("Failed to initialize AppState")?;

    let app = create_app(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!(addr = %bind_addr, "server running");
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    // 서버 실행 (Ctrl-C 시 graceful shutdown)
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
