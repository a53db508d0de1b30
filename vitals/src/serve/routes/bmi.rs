use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use vitals::{normalize_name, BmiRequest};

use super::super::db::Pool;
use super::super::store;
use super::ApiError;
use crate::api::{CalculateResponse, RecordResponse, RecordsResponse, SAVE_FAILED_PREFIX};

/// POST /api/bmi/calculate — validate, evaluate and append a BMI record
pub async fn calculate(
    State(pool): State<Arc<Pool>>,
    payload: Result<Json<BmiRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(req) = payload?;
    let record = req.validate()?;

    let save_failed = |e: String| ApiError::persistence(format!("{SAVE_FAILED_PREFIX}{e}"));

    let client = pool.get().await.map_err(|e| save_failed(e.to_string()))?;
    let id = store::insert_bmi(&client, &record)
        .await
        .map_err(|e| save_failed(e.to_string()))?;

    tracing::info!(
        id,
        name = %record.name,
        bmi = record.evaluation.bmi,
        category = %record.evaluation.category,
        "saved BMI record"
    );

    Ok(Json(CalculateResponse {
        success: true,
        bmi: record.evaluation.bmi,
        category: record.evaluation.category,
        record_id: id,
        message: "BMI calculated and saved successfully".into(),
    }))
}

/// GET /api/bmi/records — every record, newest first
pub async fn list_records(
    State(pool): State<Arc<Pool>>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let client = pool.get().await?;
    let records = store::all_bmi(&client).await?;
    Ok(Json(RecordsResponse {
        success: true,
        records,
    }))
}

/// GET /api/bmi/records/{id} — one record, `null` when absent
pub async fn get_record(
    State(pool): State<Arc<Pool>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Path(id) = id?;
    let client = pool.get().await?;
    let record = store::bmi_by_id(&client, id).await?;
    Ok(Json(RecordResponse {
        success: true,
        record,
    }))
}

/// GET /api/bmi/history/{name} — one person's records, newest first
pub async fn history(
    State(pool): State<Arc<Pool>>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let Path(raw) = name?;
    let name = normalize_name(&raw);
    tracing::debug!(%name, "history lookup");
    // Blank names never pass validation, so nothing can be stored under one.
    if name.is_empty() {
        return Ok(Json(RecordsResponse {
            success: true,
            records: Vec::new(),
        }));
    }
    let client = pool.get().await?;
    let records = store::bmi_by_name(&client, name).await?;
    Ok(Json(RecordsResponse {
        success: true,
        records,
    }))
}
