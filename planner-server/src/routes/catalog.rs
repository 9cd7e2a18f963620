//! User and course endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use planner_core::{Course, PlannerResult, PlannerStore, User, tasks};
use serde::Deserialize;

use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/courses", get(list_courses))
}

/// Courses ordered by name, the order every view lists them in.
pub fn courses_by_name(store: &dyn PlannerStore) -> PlannerResult<Vec<Course>> {
    let mut courses = store.list_courses()?;
    courses.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(courses)
}

/// GET /api/users - List users by name
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.store().list_users()?))
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// POST /api/users - Create a user
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let req = json_body(payload)?;
    let user = tasks::create_user(state.store(), &req.name)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/courses - The course catalog
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(courses_by_name(state.store())?))
}
