//! Operações de tarefas
//!
//! Listagens devolvem um [`PageStream`]; validações acontecem antes de
//! qualquer requisição e voltam como `Err` imediato.

use reqwest::Method;

use crate::client::{path_segment, require_id, AsanaClient};
use crate::codec;
use crate::error::{AsanaError, Result};
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::types::user::ME;
use crate::types::{Task, TaskRequest};

impl AsanaClient {
    /// Cria uma tarefa (`POST /tasks`)
    ///
    /// Campos somente leitura (ex.: `num_hearts`) são removidos do formulário.
    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task> {
        let values = request.create_form()?;
        let body = self.send_form(Method::POST, "/tasks", &values).await?;
        let task: Task = codec::decode_data(&body)?;

        tracing::info!("✅ Tarefa criada: {:?}", task.gid.as_deref().or(task.name.as_deref()));
        Ok(task)
    }

    pub async fn find_task_by_id(&self, task_id: &str) -> Result<Task> {
        let task_id = require_id(task_id, "taskID")?;
        self.get_data(&format!("/tasks/{}", path_segment(&task_id))).await
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let task_id = require_id(task_id, "taskID")?;
        self.delete(&format!("/tasks/{}", path_segment(&task_id))).await?;

        tracing::info!("🗑️ Tarefa {} removida", task_id);
        Ok(())
    }

    /// Lista as tarefas atribuídas ao dono do token
    ///
    /// `assignee` é sempre `me`; `limit` padrão é 20.
    pub fn list_my_tasks(&self, request: Option<&TaskRequest>) -> Result<PageStream<Task>> {
        let mut request = request.cloned().unwrap_or_default();
        request.assignee = Some(ME.to_string());
        request.fill_with_defaults();

        let query = request.list_query()?;
        let start = PaginationRequest::with_query("/tasks", &query);
        Paginator::new(self.clone(), "tasks", start).start()
    }

    pub fn list_all_my_tasks(&self) -> Result<PageStream<Task>> {
        self.list_my_tasks(None)
    }

    /// Lista as tarefas de um projeto; `project_id` é obrigatório
    pub fn list_tasks_for_project(&self, request: &TaskRequest) -> Result<PageStream<Task>> {
        let project_id = request
            .project_id
            .as_deref()
            .ok_or_else(|| AsanaError::validation_error("expecting a non-empty projectID"))?;
        self.tasks_for_project(project_id)
    }

    pub fn tasks_for_project(&self, project_id: &str) -> Result<PageStream<Task>> {
        let project_id = require_id(project_id, "projectID")?;
        let start = PaginationRequest::new(format!("/projects/{}/tasks", path_segment(&project_id)));
        Paginator::new(self.clone(), "tasks", start).start()
    }
}
