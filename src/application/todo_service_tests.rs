#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::todo::{CreateTodo, TodoId, UpdateTodo};
    use crate::infrastructure::memory_repo::InMemoryTodoRepository;

    fn service() -> TodoServiceImpl<InMemoryTodoRepository> {
        TodoServiceImpl::new(InMemoryTodoRepository::new())
    }

    #[tokio::test]
    async fn unit_create_and_get() {
        let service = service();
        let created = service.create(CreateTodo { title: "X".into() }).await.unwrap();
        assert_eq!(created.title, "X");
        let got = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn unit_update_round_trip() {
        let service = service();
        let created = service.create(CreateTodo { title: "buy milk".into() }).await.unwrap();
        assert!(!created.done);
        service.update(created.id, UpdateTodo { title: "buy milk".into(), done: true }).await.unwrap();
        let got = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(got.title, "buy milk");
        assert!(got.done);
    }

    #[tokio::test]
    async fn unit_missing_ids_are_not_errors() {
        let service = service();
        assert!(service.get(TodoId(1)).await.unwrap().is_none());
        assert!(service.update(TodoId(1), UpdateTodo { title: "x".into(), done: false }).await.unwrap().is_none());
        assert!(!service.delete(TodoId(1)).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }
}
