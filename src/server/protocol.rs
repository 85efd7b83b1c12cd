use crate::classifier::Prediction;
use serde::{Deserialize, Serialize};

/// Body of a `POST /predict` request: a raw or data-URI-wrapped base64 image
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub image: String,
}

/// Ranked classification result. `top_prediction` duplicates the first entry
/// of `predictions` for clients that only want the winner.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<Prediction>,
    pub top_prediction: Option<Prediction>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}
