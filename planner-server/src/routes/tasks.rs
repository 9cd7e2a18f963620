//! Task views and task actions

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use chrono::{DateTime, Utc};
use planner_core::overview::{self, CourseGroup, Dashboard, GanttBar};
use planner_core::tasks::{self as actions, TaskDraft};
use planner_core::{PlannerError, PlannerResult, PlannerStore, Task};
use serde::Deserialize;

use crate::routes::catalog::courses_by_name;
use crate::routes::{AppError, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/{id}/tasks", get(list_tasks))
        .route("/api/users/{id}/tasks/grouped", get(grouped_tasks))
        .route("/api/users/{id}/dashboard", get(dashboard))
        .route("/api/users/{id}/gantt", get(gantt))
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/{id}", delete(delete_task))
        .route("/api/tasks/{id}/status", patch(set_status))
        .route("/api/tasks/{id}/progress", patch(set_progress))
        .route("/api/tasks/{id}/dates", patch(set_dates))
}

/// Tasks of an existing user, soonest deadline first.
fn user_tasks(store: &dyn PlannerStore, user_id: &str) -> PlannerResult<Vec<Task>> {
    if store.find_user(user_id)?.is_none() {
        return Err(PlannerError::NotFound("User not found".into()));
    }
    actions::list_tasks(store, user_id)
}

/// GET /api/users/:id/tasks
async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(user_tasks(state.store(), &user_id)?))
}

/// GET /api/users/:id/tasks/grouped - Tasks grouped by course
async fn grouped_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CourseGroup>>, AppError> {
    let tasks = user_tasks(state.store(), &user_id)?;
    let courses = courses_by_name(state.store())?;
    Ok(Json(overview::group_by_course(&tasks, &courses)))
}

/// GET /api/users/:id/dashboard
async fn dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Dashboard>, AppError> {
    let tasks = user_tasks(state.store(), &user_id)?;
    let courses = courses_by_name(state.store())?;
    Ok(Json(Dashboard::build(&tasks, &courses)))
}

/// GET /api/users/:id/gantt - Bars for the timeline chart
async fn gantt(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<GanttBar>>, AppError> {
    let tasks = user_tasks(state.store(), &user_id)?;
    let courses = courses_by_name(state.store())?;
    Ok(Json(overview::gantt_bars(&tasks, &courses)))
}

/// POST /api/tasks - Add a task by hand
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let draft = json_body(payload)?;
    let task = actions::create_task(state.store(), draft)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// DELETE /api/tasks/:id
async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, AppError> {
    actions::delete_task(state.store(), &task_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub completed: bool,
}

/// PATCH /api/tasks/:id/status - Tick a task on or off
async fn set_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let req = json_body(payload)?;
    Ok(Json(actions::set_completed(state.store(), &task_id, req.completed)?))
}

#[derive(Deserialize)]
pub struct ProgressRequest {
    pub progress: u8,
}

/// PATCH /api/tasks/:id/progress
async fn set_progress(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let req = json_body(payload)?;
    Ok(Json(actions::set_progress(state.store(), &task_id, req.progress)?))
}

#[derive(Deserialize)]
pub struct DatesRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// PATCH /api/tasks/:id/dates - Move a task on the timeline
async fn set_dates(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<DatesRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let req = json_body(payload)?;
    let task = actions::set_dates(state.store(), &task_id, req.start_date, req.end_date)?;
    Ok(Json(task))
}
