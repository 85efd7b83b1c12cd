//! The user-facing JSON routes. `/predict` and `/predict-file` share one
//! pipeline: require a model, preprocess, infer, rank, truncate.

use super::protocol::{HealthResponse, PredictRequest, PredictResponse, StatusMessage};
use super::{ApiError, AppState};
use crate::config::TOP_N;
use crate::{classifier, preprocess};
use actix_web::error::JsonPayloadError;
use actix_web::{get, post, web, HttpRequest, Responder};
use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, info};

type Result<T> = std::result::Result<T, ApiError>;

#[get("/")]
pub async fn root() -> impl Responder {
    web::Json(StatusMessage {
        message: "Doodle Recognition API is running",
    })
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    web::Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
    })
}

#[post("/predict")]
pub async fn predict(
    req: web::Json<PredictRequest>,
    state: web::Data<AppState>,
) -> Result<impl Responder> {
    let response = run_prediction(&state, &req.image)?;
    info!("finished serving prediction request");
    Ok(web::Json(response))
}

/// Raw-binary upload variant: wrap the body as a PNG data URI and hand it to
/// the same pipeline as `/predict`
#[post("/predict-file")]
pub async fn predict_file(body: web::Bytes, state: web::Data<AppState>) -> Result<impl Responder> {
    let encoded = general_purpose::STANDARD.encode(&body);
    let response = run_prediction(&state, &format!("data:image/png;base64,{encoded}"))?;
    info!("finished serving file prediction request");
    Ok(web::Json(response))
}

fn run_prediction(state: &AppState, payload: &str) -> Result<PredictResponse> {
    let model = state.model().ok_or(ApiError::ModelUnavailable)?;

    let input = preprocess::to_tensor(payload)?;
    let probabilities = model.predict(input)?;
    let ranked = classifier::rank(&probabilities)?;

    Ok(PredictResponse {
        top_prediction: ranked.first().cloned(),
        predictions: ranked.into_iter().take(TOP_N).collect(),
    })
}

/// Any failure to extract the typed request body (missing `image` key, wrong
/// type, malformed JSON) surfaces as the missing-field kind
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("rejecting request body: {err}");
    ApiError::MissingImage.into()
}
