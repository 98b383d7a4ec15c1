use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

/// Process-lifetime item store. Clones share the same items and id counter.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    items: RwLock<BTreeMap<TodoId, Todo>>,
    last_id: AtomicI64,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }

    fn next_id(&self) -> TodoId {
        TodoId(self.inner.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let id = self.next_id();
        let todo = Todo { id, title: input.title, done: false };
        self.inner.items.write().await.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.inner.items.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.inner.items.read().await.values().cloned().collect())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        let mut items = self.inner.items.write().await;
        let Some(slot) = items.get_mut(&id) else { return Ok(None) };
        *slot = Todo { id, title: input.title, done: input.done };
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        Ok(self.inner.items.write().await.remove(&id).is_some())
    }
}
