//! Receipt total detection handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use till_core::detect::{detect_total, TotalDetector};
use till_core::models::{DetectionResult, TextFragment};

/// Request body for detection on OCR output the client already has
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub main_category: String,
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
}

/// POST /api/receipts/detect - Detect the total in OCR fragments
pub async fn detect_receipt(Json(req): Json<DetectRequest>) -> Json<DetectionResult> {
    let result = detect_total(&req.fragments, &req.main_category);
    info!(
        category = %req.main_category,
        fragments = req.fragments.len(),
        rule = %result.rule,
        "Detected receipt total"
    );
    Json(result)
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub main_category: String,
}

/// POST /api/receipts/scan?main_category=.. - OCR a raw image body and detect its total
pub async fn scan_receipt(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanQuery>,
    request: Request,
) -> Result<Json<DetectionResult>, AppError> {
    let ocr = state.ocr.clone().ok_or_else(|| {
        AppError::bad_request("OCR engine not configured (set TILL_OCR_COMMAND)")
    })?;

    let bytes = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body or file too large (max 10MB)"))?;

    if bytes.is_empty() {
        return Err(AppError::bad_request("No image data provided"));
    }

    // OCR engines are blocking (external processes)
    let category = params.main_category;
    let result = tokio::task::spawn_blocking(move || {
        TotalDetector::new(ocr.as_ref()).scan_image(&bytes, &category)
    })
    .await?;

    match result {
        Ok(detection) => Ok(Json(detection)),
        Err(e) => {
            warn!(error = %e, "Receipt scan failed");
            Err(AppError::unprocessable("Could not read text from the receipt image"))
        }
    }
}
