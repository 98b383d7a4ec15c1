use axum::{extract::{Path, State}, routing::get, Router, Json};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::{
    application::todo_service::TodoService,
    domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo},
    http::types::{ApiError, TodoPayload},
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/items", get(list_todos::<S>).post(create_todo::<S>))
        .route("/items/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

/// Path of a single item, as used in the `Location` header.
pub fn item_path(id: TodoId) -> String { format!("/items/{id}") }

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    state.service.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, Json(payload): Json<TodoPayload>) -> Result<impl IntoResponse, ApiError> {
    // New items always start open; a `done` flag in the body is ignored.
    let todo = state.service.create(CreateTodo { title: payload.title }).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, item_path(todo.id))], Json(todo)))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, Json(payload): Json<TodoPayload>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let input = UpdateTodo { title: payload.title, done: payload.done };
    state.service.update(id, input).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(s: &str) -> Result<TodoId, ApiError> { s.parse::<i64>().map(TodoId).map_err(|_| ApiError::InvalidId) }
