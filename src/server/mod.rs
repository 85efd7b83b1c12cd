//! The client-facing JSON web server: error translation, shared state, and
//! route wiring

use crate::classifier::Classifier;
use crate::preprocess::InvalidImageError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

mod protocol;
pub mod routes;

/// Everything a request handler can fail with. Translation to an HTTP status
/// and JSON body happens only here, in the [`actix_web::error::ResponseError`]
/// impl; inner layers return these kinds unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidImage(#[from] InvalidImageError),

    #[error("No image data provided")]
    MissingImage,

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Prediction failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Internal(err) => error!("prediction failed: {err:#}"),
            other => warn!("request rejected: {other}"),
        }

        let body = HashMap::from([("error", self.to_string())]);
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidImage(_) | ApiError::MissingImage => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Shared per-process state. The model handle is injected once at
/// construction and never mutated afterwards, so concurrent requests read it
/// without locking. `None` means startup has not published a model.
pub struct AppState {
    model: Option<Arc<dyn Classifier>>,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn Classifier>>) -> Self {
        AppState { model }
    }

    pub fn model(&self) -> Option<&Arc<dyn Classifier>> {
        self.model.as_ref()
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}

/// Register routes and body-extraction error handling on an actix app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
        .service(routes::root)
        .service(routes::health)
        .service(routes::predict)
        .service(routes::predict_file);
}
