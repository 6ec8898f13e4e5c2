mod config;
mod context;
mod core;
mod error;
mod handlers;
mod impls;
mod middlewares;
mod request;
mod response;

use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;

use crate::config::Config;
use crate::impls::store::mem::MemStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"));
    let config = Config::from_env().context("failed to load configuration")?;
    error::expose_diagnostics(config.is_development());

    let store = Data::new(MemStore::new());
    let address = (config.host.clone(), config.port);
    log::info!("question bank listening on {}:{} ({}, api {})", address.0, address.1, config.environment, config.api_version);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(Data::new(config.clone()))
            .app_data(handlers::json_config(config.json_limit))
            .app_data(handlers::query_config())
            .configure(|cfg| handlers::routes::<MemStore>(cfg, &config.author_id))
            .default_service(web::to(handlers::not_found))
    })
    .bind(address.clone())
    .with_context(|| format!("failed to bind {}:{}", address.0, address.1))?
    .run()
    .await?;
    Ok(())
}
