//! Calendar import endpoint

use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};
use planner_core::{ImportOutcome, import_calendar};
use serde::{Deserialize, Serialize};

use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/ics-sync", post(ics_sync))
}

/// Request body for an import. Both fields are checked by the importer so a
/// missing one gets the same message as an empty one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub ics_content: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ImportOutcome> for ImportResponse {
    fn from(outcome: ImportOutcome) -> Self {
        let count = outcome.count();
        let message = match outcome {
            ImportOutcome::Imported { .. } => None,
            ImportOutcome::Empty { message } => Some(message),
        };
        ImportResponse {
            success: true,
            count,
            message,
        }
    }
}

/// POST /api/ics-sync - Import an ICS calendar as tasks for a user
async fn ics_sync(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<ImportResponse>, AppError> {
    let req = json_body(payload)?;

    let outcome = import_calendar(
        state.store(),
        req.ics_content.as_deref().unwrap_or_default(),
        req.user_id.as_deref().unwrap_or_default(),
    )?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{seeded, send};
    use axum::http::StatusCode;
    use planner_core::PlannerStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const TWO_EVENTS: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:-//Campus//EN\r\n\
        BEGIN:VEVENT\r\n\
        UID:1\r\n\
        SUMMARY:PEC1 Matemáticas\r\n\
        DTSTART;VALUE=DATE:20250110\r\n\
        DTEND;VALUE=DATE:20250120\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:2\r\n\
        SUMMARY:Lectura del tema 3\r\n\
        DTSTART:20250112T090000Z\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    #[tokio::test]
    async fn test_import_returns_count() {
        let (store, user) = seeded();

        let (status, body) = send(
            store.clone(),
            "POST",
            "/api/ics-sync",
            Some(json!({ "icsContent": TWO_EVENTS, "userId": user.id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "count": 2 }));

        let tasks = store.tasks_for_user(&user.id).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].course_id, Some(1));
    }

    #[tokio::test]
    async fn test_import_without_events_reports_message() {
        let (store, user) = seeded();
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nEND:VCALENDAR\r\n";

        let (status, body) = send(
            store,
            "POST",
            "/api/ics-sync",
            Some(json!({ "icsContent": ics, "userId": user.id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "count": 0, "message": "No VEVENT entries found" })
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let (store, _) = seeded();

        let (status, body) = send(
            store,
            "POST",
            "/api/ics-sync",
            Some(json!({ "icsContent": TWO_EVENTS })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Missing icsContent or userId" })
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (store, _) = seeded();

        let (status, body) = send(
            store,
            "POST",
            "/api/ics-sync",
            Some(json!({ "icsContent": TWO_EVENTS, "userId": "nobody" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_unparseable_calendar_is_server_error() {
        let (store, user) = seeded();

        let (status, body) = send(
            store.clone(),
            "POST",
            "/api/ics-sync",
            Some(json!({ "icsContent": "not a calendar", "userId": user.id })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().starts_with("ICS parse error"));
        assert!(store.tasks_for_user(&user.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (store, _) = seeded();

        let (status, body) = send(store, "POST", "/api/ics-sync", Some(json!("just a string"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }
}
