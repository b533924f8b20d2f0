use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use storefront::app::{router, AppState};
use storefront::config::{load_config, Config};
use storefront::infrastructure::logger::init_logging;
use storefront::infrastructure::store::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (mut config, config_path) = load_config()?;
    config.apply_env_overrides()?;
    config.validate()?;

    let _log_guard = init_logging(&config.logging)?;

    match &config_path {
        Some(path) => info!("已加载配置文件: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let store = build_store(&config).await?;
    info!("文档存储: {}", store.backend_name());

    let state = AppState::new(config.theme.clone(), store).context("主题注册表初始化失败")?;
    info!(
        "默认主题: {}，部署级主题: {:?}",
        state.renderer.registry().default_id(),
        config.theme.fallback_id
    );

    let app = router(state, &config.http);

    let addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 店铺服务运行在 http://{}", addr);
    info!("   GET  /                                  - 店铺首页");
    info!("   GET  /api/common/section                - 当前主题");
    info!("   GET  /api/admin/shop/settings           - 店铺设置");
    info!("   POST /api/admin/skus/generate           - 生成 SKU 组合");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

#[cfg(feature = "database")]
async fn build_store(config: &Config) -> anyhow::Result<DocumentStore> {
    use storefront::infrastructure::database::DatabaseManager;

    match &config.database.url {
        Some(url) => {
            let manager = DatabaseManager::connect(&config.database, url)
                .await
                .context("数据库连接失败")?;
            manager.ensure_schema().await.context("初始化表结构失败")?;
            Ok(DocumentStore::postgres(manager.get_pool().clone()))
        }
        None => Ok(DocumentStore::memory()),
    }
}

#[cfg(not(feature = "database"))]
async fn build_store(config: &Config) -> anyhow::Result<DocumentStore> {
    if config.database.url.is_some() {
        warn!("未启用 database 特性，忽略 database.url，改用内存存储");
    }
    Ok(DocumentStore::memory())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("监听退出信号失败: {}", err);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭...");
}
