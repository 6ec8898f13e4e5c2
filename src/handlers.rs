pub mod question;

use actix_web::web::{delete, get, post, put, scope, Data, Json, JsonConfig, QueryConfig, ServiceConfig};
use actix_web::HttpResponse;
use chrono::Utc;

use crate::config::Config;
use crate::core::ports::repository::QuestionStore;
use crate::error::{Error, Violation};
use crate::middlewares::identity::Identity;
use crate::response::Health;

pub fn routes<S>(cfg: &mut ServiceConfig, author_id: &str)
where
    S: QuestionStore + 'static,
{
    cfg.route("/health", get().to(health)).service(
        scope("/api/v1/internal").wrap(Identity::new(author_id)).service(
            scope("/question")
                .route("", get().to(question::list::<S>))
                .route("", post().to(question::create::<S>))
                .route("/{id}", get().to(question::detail::<S>))
                .route("/{id}", put().to(question::update::<S>))
                .route("/{id}", delete().to(question::delete::<S>)),
        ),
    );
}

/// Body parsing failures are reported like any other rejected payload.
pub fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| Error::ValidationError(vec![Violation::new("body", "parse", err.to_string())]).into())
}

pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _| Error::ValidationError(vec![Violation::new("query", "parse", err.to_string())]).into())
}

pub async fn health(config: Data<Config>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        timestamp: Utc::now(),
        version: config.api_version.clone(),
    })
}

pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::NotFound("Rota não encontrada".into()))
}
