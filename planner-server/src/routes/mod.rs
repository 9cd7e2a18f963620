pub mod catalog;
pub mod import;
pub mod tasks;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use planner_core::PlannerError;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The full API with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(import::router())
        .merge(catalog::router())
        .merge(tasks::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Convert planner errors to HTTP responses
#[derive(Debug)]
pub struct AppError(PlannerError);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            PlannerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

/// Unwrap a JSON body, turning a malformed one into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError(PlannerError::Validation(rejection.body_text())))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use planner_core::store::Database;
    use planner_core::{JsonStore, NewCourse, PlannerStore, User};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::app;
    use crate::state::AppState;

    /// In-memory store seeded with one user and two courses.
    pub fn seeded() -> (Arc<JsonStore>, User) {
        let store = Arc::new(JsonStore::in_memory(Database::default()));
        let user = store.create_user("Ana").unwrap();
        for (code, name) in [("M1", "Matemáticas"), ("F1", "Física")] {
            store
                .create_course(NewCourse {
                    code: code.into(),
                    name: name.into(),
                    credits: 6,
                    color: "#ff0000".into(),
                })
                .unwrap();
        }
        (store, user)
    }

    pub async fn send(
        store: Arc<JsonStore>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app(AppState::new(store))
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
