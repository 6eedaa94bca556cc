//! 分组权限同步服务主入口

use auth_sync::{
    config::AppConfig,
    db,
    events::EventBus,
    handlers::health,
    middleware::AppState,
    repository::{GroupRepository, RoleRepository, ShopRepository},
    routes,
    startup::{self, SyncComponents},
    telemetry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("auth-sync {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    if let Ok(env) = std::env::var("AUTHSYNC_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // 2. 初始化日志
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "auth-sync starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    // 4. 组装同步组件
    let event_bus = Arc::new(EventBus::new());
    let components = SyncComponents::build(
        Arc::new(RoleRepository::new(db_pool.clone())),
        Arc::new(GroupRepository::new(db_pool.clone())),
        Arc::new(ShopRepository::new(db_pool.clone())),
        event_bus,
    );

    if config.sync.seed_default_roles {
        startup::seed_default_roles(&components.role_sync).await?;
    }

    let (role_sync, group_service, dispatcher) = components.spawn()?;

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        role_sync,
        group_service,
    });

    // 5. 构建路由并启动服务器
    let app = routes::create_router(app_state);
    let listener = TcpListener::bind(&config.server.addr).await?;

    tracing::info!(addr = %config.server.addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 处理完已排队的分组事件再退出
    dispatcher
        .shutdown(Duration::from_secs(config.sync.shutdown_drain_timeout_secs))
        .await;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 打印帮助信息
fn print_help() {
    println!("auth-sync {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: auth-sync [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 AUTHSYNC_ 前缀的环境变量完成");
    println!("  例如 AUTHSYNC_DATABASE__URL, AUTHSYNC_LOGGING__LEVEL");
}
