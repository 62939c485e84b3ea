use crate::client::AsanaClient;
use crate::error::Result;
use crate::pagination::{PageStream, PaginationRequest, Paginator};
use crate::types::Workspace;

impl AsanaClient {
    /// Lista os workspaces visíveis para o token
    pub fn list_my_workspaces(&self) -> Result<PageStream<Workspace>> {
        Paginator::new(self.clone(), "workspaces", PaginationRequest::new("/workspaces")).start()
    }
}
