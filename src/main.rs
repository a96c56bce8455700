use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use log::info;

use volunteer_center::config::Config;
use volunteer_center::database::{self, schema, sqlx::SqliteSqlxManager};
use volunteer_center::routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("actix_web=info,volunteer_center=info")).init();
    let config = Config::from_env()?;
    let pool = database::connect(&config.database_url, config.max_connections).await?;
    schema::init(&pool).await?;
    info!("database ready at {}", config.database_url);

    let manager = Data::new(SqliteSqlxManager::new(pool));
    let policy = Data::new(config.transition_policy);
    info!("listening on {}:{}", config.bind_address, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(manager.clone())
            .app_data(policy.clone())
            .configure(routes::configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
