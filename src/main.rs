use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use aura_backend::{
    config::Config,
    external::GeminiClient,
    handlers,
    middlewares::{AdminAuthMiddleware, create_cors},
    services::*,
    storage::JsonStore,
    swagger::swagger_config,
    tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载进程配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 打开 JSON 存储（进程启动时创建一次，克隆进各个 service）
    let store = JsonStore::open(&config.storage.data_dir).expect("Failed to open data store");

    // 外部生成服务
    let gemini_client = GeminiClient::new(config.gemini.clone());

    // 创建服务
    let app_config_service = AppConfigService::new(store.clone());
    let announcement_service = AnnouncementService::new(store.clone());
    let ticket_service = TicketService::new(
        store.clone(),
        app_config_service.clone(),
        gemini_client.clone(),
    );
    let winner_service = WinnerService::new(
        store.clone(),
        ticket_service.clone(),
        announcement_service.clone(),
    );
    let stats_service = StatsService::new(
        ticket_service.clone(),
        winner_service.clone(),
        announcement_service.clone(),
    );
    let auth_service = AuthService::new(app_config_service.clone());

    // 启动后台统计刷新任务
    tasks::spawn_all(stats_service.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AdminAuthMiddleware::new(app_config_service.clone()))
            .app_data(web::Data::new(app_config_service.clone()))
            .app_data(web::Data::new(announcement_service.clone()))
            .app_data(web::Data::new(ticket_service.clone()))
            .app_data(web::Data::new(winner_service.clone()))
            .app_data(web::Data::new(stats_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::ticket_config)
                    .configure(handlers::stats_config)
                    .configure(handlers::winner_config)
                    .configure(handlers::announcement_config)
                    .configure(handlers::config_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
