use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::num;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error as ThisError;

use crate::response::Failure;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

static DIAGNOSTICS: AtomicBool = AtomicBool::new(false);

/// Turns on the inclusion of internal error messages in 500 responses.
pub fn expose_diagnostics(enabled: bool) {
    DIAGNOSTICS.store(enabled, Ordering::Relaxed);
}

/// One violated rule of a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation error: {} violated field(s)", .0.len())]
    ValidationError(Vec<Violation>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse int error: {0}")]
    ParseIntError(#[from] num::ParseIntError),

    #[error("server error: {0}")]
    ServerError(String),
}

impl Error {
    pub fn question_not_found() -> Self {
        Error::NotFound("Questão não encontrada".into())
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::ValidationError(violations) => violations,
            _ => &[],
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Error::ValidationError(violations) => Failure::new(VALIDATION_ERROR, "Dados inválidos", serde_json::to_value(violations).ok()),
            Error::NotFound(message) => Failure::new(NOT_FOUND, message, None),
            other => {
                log::error!("unhandled error: {}", other);
                let details = DIAGNOSTICS.load(Ordering::Relaxed).then(|| serde_json::Value::String(other.to_string()));
                Failure::new(INTERNAL_SERVER_ERROR, "An unexpected error occurred", details)
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: Error) -> serde_json::Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::question_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::ServerError("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_validation_body_lists_every_violation() {
        let body = body_of(Error::ValidationError(vec![
            Violation::new("enunciado", "length", "a"),
            Violation::new("valor_pontos", "positive", "b"),
        ]))
        .await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], VALIDATION_ERROR);
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
        assert_eq!(body["error"]["details"][1]["field"], "valor_pontos");
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_not_found_body_has_no_details() {
        let body = body_of(Error::question_not_found()).await;
        assert_eq!(body["error"]["code"], NOT_FOUND);
        assert!(body["error"].get("details").is_none());
    }
}
