use std::io;

use actix_web::{App, HttpServer, middleware, web};

use govledger::config::AppConfig;
use govledger::store::PgStore;
use govledger::{db, handlers};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("{e}");
        io::Error::other(e.to_string())
    })?;

    let pool = db::init_pool(&config).await.map_err(|e| {
        log::error!("Failed to connect to database: {e}");
        io::Error::other(e.to_string())
    })?;

    if config.run_migrations {
        db::run_migrations(&pool).await.map_err(|e| {
            log::error!("Migrations failed: {e}");
            io::Error::other(e.to_string())
        })?;
    } else {
        log::info!("RUN_MIGRATIONS disabled, skipping migrations");
    }

    let store = web::Data::new(PgStore::new(pool));

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .route("/health", web::get().to(handlers::health))
            .service(web::scope("/api/v1").configure(handlers::api_v1::configure::<PgStore>))
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
