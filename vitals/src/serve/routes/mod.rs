pub mod bmi;
pub mod health;
pub mod students;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use vitals::Error;

use super::db::Pool;
use crate::api::ErrorBody;

/// Handler error: a domain error rendered as `{ success: false, error }`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        ApiError(Error::persistence(msg))
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(e: tokio_postgres::Error) -> Self {
        ApiError::persistence(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError(Error::validation(e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError(Error::validation(e.body_text()))
    }
}

/// Build the application router with all API routes.
pub fn build_router(pool: Arc<Pool>) -> Router {
    let api = Router::new()
        // Health
        .route("/health", get(health::health))
        // BMI: insert and read only
        .route("/bmi/calculate", post(bmi::calculate))
        .route("/bmi/records", get(bmi::list_records))
        .route("/bmi/records/{id}", get(bmi::get_record))
        .route("/bmi/history/{name}", get(bmi::history));

    Router::new()
        .nest("/api", api)
        // Student CRUD keeps the paths the browser client already calls.
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .with_state(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::SAVE_FAILED_PREFIX;
    use crate::serve::config::Config;
    use vitals::record::{MSG_AGE_RANGE, MSG_MEASUREMENTS, MSG_REQUIRED};

    /// Nothing listens on port 1, so any handler that reaches the pool fails.
    fn unreachable_db() -> Router {
        build_router(Pool::new(Config {
            database_url: "postgres://vitals@127.0.0.1:1/vitals".into(),
            listen_addr: Config::DEFAULT_LISTEN.into(),
            static_dir: None,
        }))
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let resp = unreachable_db().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_without_database() {
        let (status, body) = send(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn calculate_rejects_missing_identity() {
        let (status, body) = send(post_json(
            "/api/bmi/calculate",
            json!({"name": "", "age": 30, "gender": "Male", "height": 170, "weight": 70}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": MSG_REQUIRED}));
    }

    #[tokio::test]
    async fn calculate_rejects_bad_measurements() {
        let (status, body) = send(post_json(
            "/api/bmi/calculate",
            json!({"name": "Ana", "age": 30, "gender": "Female", "height": 0, "weight": 70}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_MEASUREMENTS);
    }

    #[tokio::test]
    async fn calculate_rejects_age_out_of_range() {
        let (status, body) = send(post_json(
            "/api/bmi/calculate",
            json!({"name": "Ana", "age": 151, "gender": "Female", "height": 160, "weight": 50}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_AGE_RANGE);
    }

    #[tokio::test]
    async fn calculate_rejects_malformed_json() {
        let (status, body) = send(post_json(
            "/api/bmi/calculate",
            json!({"name": "Ana", "age": "thirty", "gender": "Female"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn calculate_reports_store_failure() {
        let (status, body) = send(post_json(
            "/api/bmi/calculate",
            json!({"name": "Ana", "age": 30, "gender": "Female", "height": 160, "weight": 77}),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with(SAVE_FAILED_PREFIX), "unexpected error: {error}");
    }

    #[tokio::test]
    async fn history_reports_store_failure() {
        let (status, body) = send(
            Request::get("/api/bmi/history/Juan%20Dela%20Cruz")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn history_rejects_undecodable_name_as_json() {
        let (status, body) =
            send(Request::get("/api/bmi/history/%FF").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn blank_history_name_is_empty_without_store() {
        let (status, body) =
            send(Request::get("/api/bmi/history/%20%20").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "records": []}));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (status, body) =
            send(Request::get("/api/bmi/records/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(Request::delete("/students/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_student_validates_before_store() {
        let (status, body) = send(post_json(
            "/students",
            json!({"fullName": "Maria Clara", "course": "BSCS", "idNumber": "",
                   "department": "CCS", "currentUnits": 18}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID Number is required");
    }

    #[tokio::test]
    async fn bmi_records_have_no_write_routes() {
        let resp = unreachable_db()
            .oneshot(Request::delete("/api/bmi/records/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
