//! Operações de projetos

use reqwest::Method;

use crate::client::{path_segment, require_id, AsanaClient};
use crate::codec;
use crate::error::Result;
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::types::{Project, ProjectQuery, ProjectRequest};

const PROJECT_OPT_FIELDS: &str = "id,gid,name,notes,team,members";

impl AsanaClient {
    /// Cria um projeto; `workspace` é obrigatório
    pub async fn create_project(&self, request: &ProjectRequest) -> Result<Project> {
        request.validate()?;
        let values = request.form()?;
        let body = self.send_form(Method::POST, "/projects", &values).await?;
        codec::decode_data(&body)
    }

    /// Atualiza um projeto (`PUT /projects/{id}`)
    ///
    /// `workspace` não pode ser alterado depois da criação: enviar um valor
    /// resulta em `ValidationError` sem tocar a rede.
    pub async fn update_project(&self, request: &ProjectRequest) -> Result<Project> {
        let project_id = request.validate_update()?;
        let values = request.form()?;
        let path = format!("/projects/{}", path_segment(&project_id));
        let body = self.send_form(Method::PUT, &path, &values).await?;
        codec::decode_data(&body)
    }

    pub async fn find_project_by_id(&self, project_id: &str) -> Result<Project> {
        let project_id = require_id(project_id, "projectID")?;
        self.get_data(&format!("/projects/{}", path_segment(&project_id))).await
    }

    pub async fn delete_project_by_id(&self, project_id: &str) -> Result<()> {
        let project_id = require_id(project_id, "projectID")?;
        self.delete(&format!("/projects/{}", path_segment(&project_id))).await
    }

    pub async fn add_users_to_project(&self, request: &ProjectRequest) -> Result<()> {
        self.change_project_members(request, "addMembers").await
    }

    pub async fn remove_users_from_project(&self, request: &ProjectRequest) -> Result<()> {
        self.change_project_members(request, "removeMembers").await
    }

    async fn change_project_members(&self, request: &ProjectRequest, action: &str) -> Result<()> {
        let project_gid = request.validate_membership()?;
        let path = format!("/projects/{}/{}", path_segment(&project_gid), action);
        self.send_form(Method::POST, &path, &request.members_form()).await?;
        Ok(())
    }

    /// Consulta projetos por workspace e/ou time
    pub fn query_for_projects(&self, query: &ProjectQuery) -> Result<PageStream<Project>> {
        query.validate()?;
        let start = PaginationRequest::with_query(
            &format!("/projects?opt_fields={}", PROJECT_OPT_FIELDS),
            &query.query()?,
        );
        Paginator::new(self.clone(), "projects", start).start()
    }
}
