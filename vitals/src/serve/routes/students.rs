use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use vitals::{Error, StudentInput, StudentRecord};

use super::super::db::Pool;
use super::super::store;
use super::ApiError;
use crate::api::DeletedResponse;

fn not_found(id: i64) -> ApiError {
    ApiError(Error::NotFound(format!("Student {id} not found")))
}

/// GET /students — all students by id
pub async fn list_students(
    State(pool): State<Arc<Pool>>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    let client = pool.get().await?;
    Ok(Json(store::list_students(&client).await?))
}

/// GET /students/{id}
pub async fn get_student(
    State(pool): State<Arc<Pool>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentRecord>, ApiError> {
    let Path(id) = id?;
    let client = pool.get().await?;
    store::get_student(&client, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /students — create a student
pub async fn create_student(
    State(pool): State<Arc<Pool>>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), ApiError> {
    let Json(input) = payload?;
    let fields = input.validate()?;
    let client = pool.get().await?;
    let student = store::insert_student(&client, fields).await?;
    tracing::info!(id = student.id, "created student");
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /students/{id} — replace a student's fields
pub async fn update_student(
    State(pool): State<Arc<Pool>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<StudentRecord>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let fields = input.validate()?;
    let client = pool.get().await?;
    store::update_student(&client, id, fields)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /students/{id}
pub async fn delete_student(
    State(pool): State<Arc<Pool>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    let client = pool.get().await?;
    if !store::delete_student(&client, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "deleted student");
    Ok(Json(DeletedResponse { success: true, id }))
}
