pub mod routing;
pub mod types;

use axum::Router;

use crate::application::todo_service::TodoServiceImpl;
use crate::infrastructure::memory_repo::InMemoryTodoRepository;
use routing::todos;

/// Full application router backed by a fresh, empty in-memory store.
pub fn build_router() -> Router {
    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());
    routing::app(todos::router(todos::AppState { service }))
}
