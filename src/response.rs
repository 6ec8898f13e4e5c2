use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    data: T,
    metadata: Metadata,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Success {
            success: true,
            data,
            metadata: Metadata { timestamp: now() },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    success: bool,
    error: ErrorBody,
    timestamp: String,
}

impl Failure {
    pub fn new(code: &str, message: &str, details: Option<serde_json::Value>) -> Self {
        Failure {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details,
            },
            timestamp: now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
